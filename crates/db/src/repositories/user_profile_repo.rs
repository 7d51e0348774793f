//! Repository for the `user_profiles` table.

use sqlx::PgPool;

use jobflow_core::types::DbId;

use crate::models::user_profile::{NewUserProfile, UserProfile};

/// Column list for `user_profiles` queries.
const COLUMNS: &str = "id, user_id, session_id, full_name, email, phone, website, \
     location, description, desired_position, years_experience, skills, \
     current_company, cv_file_name, cv_file_url, job_title, job_company, \
     job_description, created_at, updated_at";

/// Provides operations for finalized user profiles.
pub struct UserProfileRepo;

impl UserProfileRepo {
    /// Insert the profile produced by finalizing a session.
    ///
    /// `uq_user_profiles_session_id` makes this idempotent: if a profile
    /// for the session already exists the insert is a no-op and `None` is
    /// returned; the caller then reads the existing row.
    pub async fn insert_for_session(
        pool: &PgPool,
        profile: &NewUserProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (\
                user_id, session_id, full_name, email, phone, website, \
                location, description, desired_position, years_experience, \
                skills, current_company, cv_file_name, cv_file_url, \
                job_title, job_company, job_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             ON CONFLICT (session_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(profile.user_id)
            .bind(profile.session_id)
            .bind(&profile.full_name)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(&profile.website)
            .bind(&profile.location)
            .bind(&profile.description)
            .bind(&profile.desired_position)
            .bind(profile.years_experience)
            .bind(&profile.skills)
            .bind(&profile.current_company)
            .bind(&profile.cv_file_name)
            .bind(&profile.cv_file_url)
            .bind(&profile.job_title)
            .bind(&profile.job_company)
            .bind(&profile.job_description)
            .fetch_optional(pool)
            .await
    }

    /// Find the profile produced by a given session.
    pub async fn find_by_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE session_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user's most recent profile.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_profiles \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
