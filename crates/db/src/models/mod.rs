//! Entity models.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the DTOs the repositories accept.

pub mod onboarding_session;
pub mod user_profile;
