//! One validator per onboarding step.
//!
//! Each validator takes the raw JSON payload for its step and produces the
//! normalized typed payload, or every violated field. The normalized form
//! is what gets merged into the session's data bag, so the structs here
//! define the stable shape of `data[step]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{
    optional_string, optional_string_list, optional_url, require_email, require_int_range,
    require_string, require_text, require_url, FieldViolation,
};
use crate::error::CoreError;
use crate::onboarding::OnboardingStep;

// ---------------------------------------------------------------------------
// Normalized step payloads
// ---------------------------------------------------------------------------

/// Step 1: who the candidate is and how to reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub location: String,
}

/// Step 2: the candidate's self-description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDescription {
    pub description: String,
}

/// Step 3: target role and experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalInfo {
    pub desired_position: String,
    pub years_experience: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
}

/// Step 4: a reference to the uploaded CV. The file bytes live in object
/// storage outside this system; only the reference is kept here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvUpload {
    pub file_name: String,
    pub file_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Step 5: the job posting the candidate is preparing for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescription {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_url: Option<String>,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Per-step validators
// ---------------------------------------------------------------------------

type StepResult<T> = Result<T, Vec<FieldViolation>>;

fn validate_personal_info(obj: &serde_json::Map<String, Value>) -> StepResult<PersonalInfo> {
    let mut out = Vec::new();
    let full_name = require_string(obj, "full_name", 100, &mut out);
    let email = require_email(obj, "email", 255, &mut out);
    let phone = require_string(obj, "phone", 20, &mut out);
    let website = optional_url(obj, "website", 255, &mut out);
    let location = require_string(obj, "location", 100, &mut out);

    match (full_name, email, phone, location) {
        (Some(full_name), Some(email), Some(phone), Some(location)) if out.is_empty() => {
            Ok(PersonalInfo {
                full_name,
                email,
                phone,
                website,
                location,
            })
        }
        _ => Err(out),
    }
}

fn validate_profile_description(
    obj: &serde_json::Map<String, Value>,
) -> StepResult<ProfileDescription> {
    let mut out = Vec::new();
    let description = require_text(obj, "description", 10, 2000, &mut out);

    match description {
        Some(description) if out.is_empty() => Ok(ProfileDescription { description }),
        _ => Err(out),
    }
}

fn validate_professional_info(
    obj: &serde_json::Map<String, Value>,
) -> StepResult<ProfessionalInfo> {
    let mut out = Vec::new();
    let desired_position = require_string(obj, "desired_position", 100, &mut out);
    let years_experience = require_int_range(obj, "years_experience", 0, 60, &mut out);
    let skills = optional_string_list(obj, "skills", 50, 50, &mut out);
    let current_company = optional_string(obj, "current_company", 100, &mut out);

    match (desired_position, years_experience) {
        (Some(desired_position), Some(years_experience)) if out.is_empty() => {
            Ok(ProfessionalInfo {
                desired_position,
                years_experience,
                skills: skills.unwrap_or_default(),
                current_company,
            })
        }
        _ => Err(out),
    }
}

fn validate_cv_upload(obj: &serde_json::Map<String, Value>) -> StepResult<CvUpload> {
    let mut out = Vec::new();
    let file_name = require_string(obj, "file_name", 255, &mut out);
    let file_url = require_url(obj, "file_url", 255, &mut out);
    let mime_type = optional_string(obj, "mime_type", 100, &mut out);

    match (file_name, file_url) {
        (Some(file_name), Some(file_url)) if out.is_empty() => Ok(CvUpload {
            file_name,
            file_url,
            mime_type,
        }),
        _ => Err(out),
    }
}

fn validate_job_description(obj: &serde_json::Map<String, Value>) -> StepResult<JobDescription> {
    let mut out = Vec::new();
    let title = require_string(obj, "title", 150, &mut out);
    let company = optional_string(obj, "company", 100, &mut out);
    let posting_url = optional_url(obj, "posting_url", 255, &mut out);
    let description = require_string(obj, "description", 5000, &mut out);

    match (title, description) {
        (Some(title), Some(description)) if out.is_empty() => Ok(JobDescription {
            title,
            company,
            posting_url,
            description,
        }),
        _ => Err(out),
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Validate a raw step payload and return its normalized JSON form.
///
/// Returns [`CoreError::StepValidation`] carrying every violated field, or
/// [`CoreError::Validation`] when the payload is not a JSON object at all.
pub fn validate_step(step: OnboardingStep, payload: &Value) -> Result<Value, CoreError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| CoreError::Validation("Step payload must be a JSON object".to_string()))?;

    let normalized = match step {
        OnboardingStep::PersonalInfo => validate_personal_info(obj).map(to_json),
        OnboardingStep::ProfileDescription => validate_profile_description(obj).map(to_json),
        OnboardingStep::ProfessionalInfo => validate_professional_info(obj).map(to_json),
        OnboardingStep::CvUpload => validate_cv_upload(obj).map(to_json),
        OnboardingStep::JobDescription => validate_job_description(obj).map(to_json),
    };

    normalized
        .map_err(|violations| CoreError::StepValidation { step, violations })
        .and_then(|v| v.map_err(|e| CoreError::Internal(e.to_string())))
}

fn to_json<T: Serialize>(payload: T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(payload)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
