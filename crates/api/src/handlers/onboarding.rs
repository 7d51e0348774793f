//! Handlers for the onboarding session orchestrator.
//!
//! A session walks a fixed linear sequence of steps. Submission is
//! user-keyed (the caller's active session is resolved from the token),
//! forward-only, and commits each step as a single optimistically-guarded
//! UPDATE; reads and finalization are session-keyed.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use jobflow_ai::{prompts, GenerationError};
use jobflow_core::error::CoreError;
use jobflow_core::onboarding::{self, OnboardingStatus, OnboardingStep};
use jobflow_core::profile::assemble_profile;
use jobflow_core::types::DbId;
use jobflow_core::validation::validate_step;
use jobflow_db::models::onboarding_session::OnboardingSession;
use jobflow_db::models::user_profile::NewUserProfile;
use jobflow_db::repositories::{OnboardingSessionRepo, UserProfileRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Response body for a profile-description suggestion.
#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that an onboarding session exists, returning the full row.
async fn ensure_session_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<OnboardingSession> {
    OnboardingSessionRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "OnboardingSession",
                id,
            })
        })
}

/// Verify that the authenticated user owns the session.
fn ensure_owned_by(session: &OnboardingSession, user_id: DbId) -> AppResult<()> {
    if session.user_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Session belongs to a different user".into(),
        )));
    }
    Ok(())
}

/// Resolve the caller's in-progress session.
async fn active_session_for(pool: &sqlx::PgPool, user_id: DbId) -> AppResult<OnboardingSession> {
    OnboardingSessionRepo::find_active_by_user(pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Active onboarding session for user",
                id: user_id,
            })
        })
}

// ---------------------------------------------------------------------------
// POST /onboarding/start
// ---------------------------------------------------------------------------

/// Start an onboarding session for the authenticated user.
///
/// Single-active-session policy: fails with `DUPLICATE_SESSION` if the
/// user already has an in-progress session. The partial unique index on
/// `onboarding_sessions` backs this check up under races.
pub async fn start_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    if OnboardingSessionRepo::find_active_by_user(&state.pool, auth.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::DuplicateSession {
            user_id: auth.user_id,
        }));
    }

    let session = OnboardingSessionRepo::create(&state.pool, auth.user_id).await?;

    tracing::info!(
        session_id = session.id,
        user_id = auth.user_id,
        "Onboarding session started"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

// ---------------------------------------------------------------------------
// POST /onboarding/steps/{step}
// ---------------------------------------------------------------------------

/// Submit the payload for the caller's current step.
///
/// The submitted step must equal the session's current step; the payload
/// must pass the step's validator. On success the normalized payload is
/// merged into the data bag, the step is recorded as completed, and the
/// session advances (or completes, on the final step) -- all in one atomic
/// compare-and-swap UPDATE keyed on the session version.
pub async fn submit_step(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(step_key): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let step = OnboardingStep::from_str_db(&step_key)?;

    let session = active_session_for(&state.pool, auth.user_id).await?;

    onboarding::check_submission(
        session.status_enum()?,
        session.current_step_enum()?,
        step,
    )?;

    let normalized = validate_step(step, &payload)?;
    let transition = onboarding::transition_after(step);

    let updated = OnboardingSessionRepo::apply_step_transition(
        &state.pool,
        session.id,
        session.version,
        step,
        &normalized,
        transition,
    )
    .await?
    // Zero rows matched: another writer advanced the session between our
    // read and this update.
    .ok_or(AppError::Core(CoreError::ConcurrentModification {
        entity: "OnboardingSession",
        id: session.id,
    }))?;

    tracing::info!(
        session_id = session.id,
        user_id = auth.user_id,
        step = %step,
        completed = transition.completes,
        "Onboarding step submitted"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// GET /onboarding/{id}
// ---------------------------------------------------------------------------

/// Get a session projection by ID.
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = ensure_session_exists(&state.pool, id).await?;
    ensure_owned_by(&session, auth.user_id)?;
    Ok(Json(DataResponse { data: session }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/{id}/finalize
// ---------------------------------------------------------------------------

/// Convert a completed session's accumulated data into a durable user
/// profile.
///
/// Idempotent: a second call returns the profile created by the first, with
/// no duplicate row (enforced by the unique index on `session_id`).
pub async fn finalize_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = ensure_session_exists(&state.pool, id).await?;
    ensure_owned_by(&session, auth.user_id)?;

    onboarding::can_finalize(session.status_enum()?)?;

    let draft = assemble_profile(&session.data)?;
    let new_profile = NewUserProfile {
        user_id: session.user_id,
        session_id: session.id,
        full_name: draft.personal.full_name,
        email: draft.personal.email,
        phone: draft.personal.phone,
        website: draft.personal.website,
        location: draft.personal.location,
        description: draft.about.description,
        desired_position: draft.professional.desired_position,
        years_experience: draft.professional.years_experience as i32,
        skills: draft.professional.skills,
        current_company: draft.professional.current_company,
        cv_file_name: draft.cv.file_name,
        cv_file_url: draft.cv.file_url,
        job_title: draft.job.title,
        job_company: draft.job.company,
        job_description: draft.job.description,
    };

    let profile = match UserProfileRepo::insert_for_session(&state.pool, &new_profile).await? {
        Some(created) => {
            tracing::info!(
                session_id = session.id,
                user_id = session.user_id,
                profile_id = created.id,
                "Onboarding session finalized"
            );
            created
        }
        // Already finalized; return the existing profile.
        None => UserProfileRepo::find_by_session(&state.pool, session.id)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(
                    "Profile insert conflicted but no existing row was found".into(),
                )
            })?,
    };

    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/{id}/abandon
// ---------------------------------------------------------------------------

/// Explicitly abandon an in-progress session. Abandonment is never
/// time-triggered.
pub async fn abandon_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = ensure_session_exists(&state.pool, id).await?;
    ensure_owned_by(&session, auth.user_id)?;

    onboarding::can_abandon(session.status_enum()?)?;

    let updated = OnboardingSessionRepo::mark_abandoned(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::ConcurrentModification {
            entity: "OnboardingSession",
            id,
        }))?;

    tracing::info!(
        session_id = id,
        user_id = auth.user_id,
        "Onboarding session abandoned"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/{id}/suggest-description
// ---------------------------------------------------------------------------

/// Generate a profile-description suggestion from the session's data so
/// far.
///
/// The suggestion is returned to the client and never written to the
/// session; the client submits it through the normal step endpoint. A
/// generator failure therefore cannot corrupt session state.
pub async fn suggest_description(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = ensure_session_exists(&state.pool, id).await?;
    ensure_owned_by(&session, auth.user_id)?;

    if session.status_enum()? != OnboardingStatus::InProgress {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot request a suggestion for a session that is not in progress".into(),
        )));
    }

    let prompt = prompts::profile_description_prompt(&session.data);
    let budget = Duration::from_secs(state.config.generation_budget_secs);

    let suggestion = tokio::time::timeout(
        budget,
        state
            .generator
            .generate(prompts::PROFILE_DESCRIPTION_SYSTEM, &prompt),
    )
    .await
    .map_err(|_| {
        AppError::Generation(GenerationError::Timeout {
            budget_secs: budget.as_secs(),
        })
    })??;

    tracing::info!(
        session_id = id,
        user_id = auth.user_id,
        chars = suggestion.len(),
        "Profile description suggestion generated"
    );

    Ok(Json(DataResponse {
        data: SuggestionResponse { suggestion },
    }))
}
