//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod onboarding_session_repo;
pub mod user_profile_repo;

pub use onboarding_session_repo::OnboardingSessionRepo;
pub use user_profile_repo::UserProfileRepo;
