//! Onboarding session entity model.

use serde::Serialize;
use sqlx::FromRow;

use jobflow_core::error::CoreError;
use jobflow_core::onboarding::{OnboardingStatus, OnboardingStep};
use jobflow_core::types::{DbId, Timestamp};

/// A row from the `onboarding_sessions` table.
///
/// `current_step`, `status`, and `completed_steps` are stored as their
/// stable string keys; use the `*_enum` accessors to get the typed values.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingSession {
    pub id: DbId,
    pub user_id: DbId,
    pub current_step: String,
    pub status: String,
    pub completed_steps: Vec<String>,
    pub data: serde_json::Value,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl OnboardingSession {
    /// Typed view of `status`.
    pub fn status_enum(&self) -> Result<OnboardingStatus, CoreError> {
        OnboardingStatus::from_str_db(&self.status)
    }

    /// Typed view of `current_step`.
    pub fn current_step_enum(&self) -> Result<OnboardingStep, CoreError> {
        OnboardingStep::from_str_db(&self.current_step)
    }

    /// Typed view of `completed_steps`.
    pub fn completed_steps_enum(&self) -> Result<Vec<OnboardingStep>, CoreError> {
        self.completed_steps
            .iter()
            .map(|s| OnboardingStep::from_str_db(s))
            .collect()
    }
}
