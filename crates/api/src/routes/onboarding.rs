//! Route definitions for the onboarding session orchestrator.
//!
//! Mounted at `/onboarding` by `api_routes()`.
//!
//! ```text
//! POST   /start                        start_session
//! POST   /steps/{step}                 submit_step (user-keyed)
//! GET    /{id}                         get_session
//! POST   /{id}/finalize                finalize_session
//! POST   /{id}/abandon                 abandon_session
//! POST   /{id}/suggest-description     suggest_description
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Onboarding routes -- mounted at `/onboarding`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(onboarding::start_session))
        .route("/steps/{step}", post(onboarding::submit_step))
        .route("/{id}", get(onboarding::get_session))
        .route("/{id}/finalize", post(onboarding::finalize_session))
        .route("/{id}/abandon", post(onboarding::abandon_session))
        .route(
            "/{id}/suggest-description",
            post(onboarding::suggest_description),
        )
}
