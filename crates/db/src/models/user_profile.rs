//! User profile entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use jobflow_core::types::{DbId, Timestamp};

/// A row from the `user_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub session_id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub location: String,
    pub description: String,
    pub desired_position: String,
    pub years_experience: i32,
    pub skills: Vec<String>,
    pub current_company: Option<String>,
    pub cv_file_name: String,
    pub cv_file_url: String,
    pub job_title: String,
    pub job_company: Option<String>,
    pub job_description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a profile during finalization.
#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub user_id: DbId,
    pub session_id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub location: String,
    pub description: String,
    pub desired_position: String,
    pub years_experience: i32,
    pub skills: Vec<String>,
    pub current_company: Option<String>,
    pub cv_file_name: String,
    pub cv_file_url: String,
    pub job_title: String,
    pub job_company: Option<String>,
    pub job_description: String,
}
