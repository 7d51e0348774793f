//! Per-step payload validation.
//!
//! Validation is pure: a payload goes in, and either a normalized payload
//! comes out or a list of every violated field. No side effects.

mod fields;
mod steps;

pub use fields::FieldViolation;
pub use steps::{
    validate_step, CvUpload, JobDescription, PersonalInfo, ProfessionalInfo, ProfileDescription,
};
