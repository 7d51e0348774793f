//! Identity boundary.
//!
//! Token issuance lives with the external authentication collaborator;
//! this module only validates the HS256 access tokens it issues (plus a
//! generation helper used by tests and local development).

pub mod jwt;
