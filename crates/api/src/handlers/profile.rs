//! Handlers for finalized user profiles.

use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use jobflow_ai::prompts::{self, CoverLetterInputs};
use jobflow_ai::GenerationError;
use jobflow_core::error::CoreError;
use jobflow_db::repositories::UserProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for a cover letter draft.
#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub letter: String,
}

// ---------------------------------------------------------------------------
// GET /profiles/me
// ---------------------------------------------------------------------------

/// Get the authenticated user's finalized profile.
pub async fn get_my_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let profile = UserProfileRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UserProfile",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// POST /profiles/me/cover-letter
// ---------------------------------------------------------------------------

/// Draft a cover letter from the finalized profile and the job posting
/// captured during onboarding.
pub async fn draft_cover_letter(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let profile = UserProfileRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UserProfile",
            id: auth.user_id,
        }))?;

    let inputs = CoverLetterInputs {
        full_name: &profile.full_name,
        desired_position: &profile.desired_position,
        years_experience: profile.years_experience,
        skills: &profile.skills,
        description: &profile.description,
        job_title: &profile.job_title,
        job_company: profile.job_company.as_deref(),
        job_description: &profile.job_description,
    };
    let prompt = prompts::cover_letter_prompt(&inputs);
    let budget = Duration::from_secs(state.config.generation_budget_secs);

    let letter = tokio::time::timeout(
        budget,
        state.generator.generate(prompts::COVER_LETTER_SYSTEM, &prompt),
    )
    .await
    .map_err(|_| {
        AppError::Generation(GenerationError::Timeout {
            budget_secs: budget.as_secs(),
        })
    })??;

    tracing::info!(
        user_id = auth.user_id,
        profile_id = profile.id,
        chars = letter.len(),
        "Cover letter drafted"
    );

    Ok(Json(DataResponse {
        data: CoverLetterResponse { letter },
    }))
}
