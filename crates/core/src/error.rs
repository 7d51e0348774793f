use crate::onboarding::OnboardingStep;
use crate::types::DbId;
use crate::validation::FieldViolation;

/// Domain-level error type shared by the repository and API layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// One or more fields of a step payload were rejected. Carries every
    /// violated field, not just the first.
    #[error("Step '{step}' payload rejected: {} field(s) failed validation", .violations.len())]
    StepValidation {
        step: OnboardingStep,
        violations: Vec<FieldViolation>,
    },

    /// The submitted step is not the session's current step.
    #[error("Invalid step order: session is on '{expected}', got '{submitted}'")]
    InvalidStepOrder {
        expected: OnboardingStep,
        submitted: OnboardingStep,
    },

    /// The user already has an in-progress onboarding session.
    #[error("User {user_id} already has an active onboarding session")]
    DuplicateSession { user_id: DbId },

    /// An optimistic-concurrency conflict: the caller's snapshot of the
    /// session is stale. The client must re-fetch and retry.
    #[error("Concurrent modification of {entity} with id {id}")]
    ConcurrentModification { entity: &'static str, id: DbId },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
