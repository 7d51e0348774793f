//! Assembly of a user profile from a completed session's data bag.
//!
//! Finalization reads the normalized payload of every step back out of the
//! session's `data` JSONB and merges them into one flat draft. The draft is
//! pure data; the repository layer decides how to persist it.

use serde_json::Value;

use crate::error::CoreError;
use crate::onboarding::OnboardingStep;
use crate::validation::{CvUpload, JobDescription, PersonalInfo, ProfessionalInfo, ProfileDescription};

/// The merged output of all five steps, ready to persist as a user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub personal: PersonalInfo,
    pub about: ProfileDescription,
    pub professional: ProfessionalInfo,
    pub cv: CvUpload,
    pub job: JobDescription,
}

/// Build a [`ProfileDraft`] from a completed session's data bag.
///
/// Fails with [`CoreError::Internal`] if a step's payload is missing or no
/// longer matches its normalized shape; both would mean the completion
/// invariant was broken upstream.
pub fn assemble_profile(data: &Value) -> Result<ProfileDraft, CoreError> {
    Ok(ProfileDraft {
        personal: step_payload(data, OnboardingStep::PersonalInfo)?,
        about: step_payload(data, OnboardingStep::ProfileDescription)?,
        professional: step_payload(data, OnboardingStep::ProfessionalInfo)?,
        cv: step_payload(data, OnboardingStep::CvUpload)?,
        job: step_payload(data, OnboardingStep::JobDescription)?,
    })
}

fn step_payload<T: serde::de::DeserializeOwned>(
    data: &Value,
    step: OnboardingStep,
) -> Result<T, CoreError> {
    let payload = data.get(step.as_str()).ok_or_else(|| {
        CoreError::Internal(format!("Completed session is missing data for step '{step}'"))
    })?;
    serde_json::from_value(payload.clone()).map_err(|e| {
        CoreError::Internal(format!("Stored payload for step '{step}' is malformed: {e}"))
    })
}
