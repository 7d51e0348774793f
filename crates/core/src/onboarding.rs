//! Onboarding step and status enumerations and transition rules.
//!
//! Defines the fixed linear step order, the session status values, and the
//! pure checks the API and repository layers apply before mutating a
//! session. Steps form a strict sequence; there is no branching and no
//! orchestrator-level backward navigation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Onboarding status
// ---------------------------------------------------------------------------

/// Status values for an onboarding session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl OnboardingStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(CoreError::Validation(format!(
                "Invalid onboarding status '{s}'. Must be one of: in_progress, completed, abandoned"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

impl std::fmt::Display for OnboardingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Onboarding steps
// ---------------------------------------------------------------------------

/// The five steps of onboarding, in submission order.
///
/// The serialized names double as the stable keys of the session's JSONB
/// data bag and the `completed_steps` array, so exports round-trip across
/// implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    PersonalInfo,
    ProfileDescription,
    ProfessionalInfo,
    CvUpload,
    JobDescription,
}

/// All steps in submission order.
pub const ORDERED_STEPS: [OnboardingStep; 5] = [
    OnboardingStep::PersonalInfo,
    OnboardingStep::ProfileDescription,
    OnboardingStep::ProfessionalInfo,
    OnboardingStep::CvUpload,
    OnboardingStep::JobDescription,
];

/// Total number of steps.
pub const TOTAL_STEPS: usize = 5;

/// The step every new session starts on.
pub const FIRST_STEP: OnboardingStep = OnboardingStep::PersonalInfo;

impl OnboardingStep {
    /// Parse a step key from the database or a URL path segment.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "personal_info" => Ok(Self::PersonalInfo),
            "profile_description" => Ok(Self::ProfileDescription),
            "professional_info" => Ok(Self::ProfessionalInfo),
            "cv_upload" => Ok(Self::CvUpload),
            "job_description" => Ok(Self::JobDescription),
            _ => Err(CoreError::Validation(format!(
                "Invalid onboarding step '{s}'. Must be one of: personal_info, \
                 profile_description, professional_info, cv_upload, job_description"
            ))),
        }
    }

    /// The stable key used for storage and the HTTP path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "personal_info",
            Self::ProfileDescription => "profile_description",
            Self::ProfessionalInfo => "professional_info",
            Self::CvUpload => "cv_upload",
            Self::JobDescription => "job_description",
        }
    }

    /// Zero-based position in the fixed order.
    pub fn position(self) -> usize {
        match self {
            Self::PersonalInfo => 0,
            Self::ProfileDescription => 1,
            Self::ProfessionalInfo => 2,
            Self::CvUpload => 3,
            Self::JobDescription => 4,
        }
    }

    /// The step after this one, or `None` for the final step.
    pub fn next(self) -> Option<Self> {
        ORDERED_STEPS.get(self.position() + 1).copied()
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Info",
            Self::ProfileDescription => "Profile Description",
            Self::ProfessionalInfo => "Professional Info",
            Self::CvUpload => "CV Upload",
            Self::JobDescription => "Job Description",
        }
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transition rules
// ---------------------------------------------------------------------------

/// The state a session moves to after a successful step submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTransition {
    /// The session's `current_step` after the submission. Stays on the
    /// final step when the submission completes the session.
    pub current_step: OnboardingStep,
    /// The session's status after the submission.
    pub status: OnboardingStatus,
    /// Whether this submission completed the session (`completed_at` must
    /// be set exactly when this is true).
    pub completes: bool,
}

/// Check that a step submission is admissible for a session snapshot.
///
/// Submissions are forward-only: the submitted step must equal the
/// session's current step. Completed steps cannot be resubmitted.
pub fn check_submission(
    status: OnboardingStatus,
    current_step: OnboardingStep,
    submitted: OnboardingStep,
) -> Result<(), CoreError> {
    if status != OnboardingStatus::InProgress {
        return Err(CoreError::Validation(format!(
            "Cannot submit a step to a session with status '{status}'"
        )));
    }
    if submitted != current_step {
        return Err(CoreError::InvalidStepOrder {
            expected: current_step,
            submitted,
        });
    }
    Ok(())
}

/// Compute the transition resulting from a successful submission of `step`.
pub fn transition_after(step: OnboardingStep) -> StepTransition {
    match step.next() {
        Some(next) => StepTransition {
            current_step: next,
            status: OnboardingStatus::InProgress,
            completes: false,
        },
        None => StepTransition {
            current_step: step,
            status: OnboardingStatus::Completed,
            completes: true,
        },
    }
}

/// Check that a session can be finalized into a user profile.
pub fn can_finalize(status: OnboardingStatus) -> Result<(), CoreError> {
    if status != OnboardingStatus::Completed {
        return Err(CoreError::Conflict(format!(
            "Cannot finalize a session with status '{status}'. \
             All steps must be completed first."
        )));
    }
    Ok(())
}

/// Check that a session can be abandoned (must be in progress).
pub fn can_abandon(status: OnboardingStatus) -> Result<(), CoreError> {
    if status != OnboardingStatus::InProgress {
        return Err(CoreError::Conflict(format!(
            "Cannot abandon a session with status '{status}'. \
             Only in-progress sessions can be abandoned."
        )));
    }
    Ok(())
}

/// Whether a `completed_steps` set covers the full step enumeration.
pub fn all_steps_completed(completed: &[OnboardingStep]) -> bool {
    ORDERED_STEPS.iter().all(|s| completed.contains(s))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
