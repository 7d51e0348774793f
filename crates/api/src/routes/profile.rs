//! Route definitions for finalized user profiles.
//!
//! Mounted at `/profiles` by `api_routes()`.
//!
//! ```text
//! GET    /me                  get_my_profile
//! POST   /me/cover-letter     draft_cover_letter
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Profile routes -- mounted at `/profiles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(profile::get_my_profile))
        .route("/me/cover-letter", post(profile::draft_cover_letter))
}
