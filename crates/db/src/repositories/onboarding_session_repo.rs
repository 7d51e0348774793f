//! Repository for the `onboarding_sessions` table.

use sqlx::PgPool;

use jobflow_core::onboarding::{OnboardingStep, StepTransition};
use jobflow_core::types::DbId;

use crate::models::onboarding_session::OnboardingSession;

/// Column list for `onboarding_sessions` queries.
const COLUMNS: &str = "id, user_id, current_step, status, completed_steps, data, \
     version, created_at, updated_at, completed_at";

/// Provides CRUD operations for onboarding sessions.
pub struct OnboardingSessionRepo;

impl OnboardingSessionRepo {
    /// Insert a new session for a user, starting at the first step.
    ///
    /// Fails with a unique violation on `uq_onboarding_sessions_active_user`
    /// if the user already has an in-progress session.
    pub async fn create(pool: &PgPool, user_id: DbId) -> Result<OnboardingSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO onboarding_sessions (user_id) \
             VALUES ($1) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingSession>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a session by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OnboardingSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_sessions WHERE id = $1");
        sqlx::query_as::<_, OnboardingSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the user's in-progress session, if any.
    pub async fn find_active_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<OnboardingSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM onboarding_sessions \
             WHERE user_id = $1 AND status = 'in_progress'"
        );
        sqlx::query_as::<_, OnboardingSession>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Commit a step submission as one atomic, optimistically-guarded
    /// UPDATE: merge the normalized payload into the data bag, append the
    /// step to `completed_steps`, move `current_step`/`status`, stamp
    /// `completed_at` when the submission completes the session, and bump
    /// `version`/`updated_at` -- all or nothing.
    ///
    /// Returns `None` when zero rows matched: the session is gone, no
    /// longer in progress, or `expected_version` is stale. The caller
    /// distinguishes those by re-fetching.
    pub async fn apply_step_transition(
        pool: &PgPool,
        id: DbId,
        expected_version: i64,
        step: OnboardingStep,
        normalized_payload: &serde_json::Value,
        transition: StepTransition,
    ) -> Result<Option<OnboardingSession>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_sessions SET \
                data = data || jsonb_build_object($3::text, $4::jsonb), \
                completed_steps = array_append(completed_steps, $3), \
                current_step = $5, \
                status = $6, \
                completed_at = CASE WHEN $7 THEN NOW() ELSE completed_at END, \
                version = version + 1, \
                updated_at = NOW() \
             WHERE id = $1 AND version = $2 AND status = 'in_progress' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingSession>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(step.as_str())
            .bind(normalized_payload)
            .bind(transition.current_step.as_str())
            .bind(transition.status.as_str())
            .bind(transition.completes)
            .fetch_optional(pool)
            .await
    }

    /// Mark an in-progress session as abandoned.
    ///
    /// Returns `None` if the session does not exist or is not in progress.
    pub async fn mark_abandoned(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OnboardingSession>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_sessions SET \
                status = 'abandoned', \
                version = version + 1, \
                updated_at = NOW() \
             WHERE id = $1 AND status = 'in_progress' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
