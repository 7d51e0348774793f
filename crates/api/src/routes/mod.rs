pub mod health;
pub mod onboarding;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /onboarding/...    session orchestrator (see routes::onboarding)
/// /profiles/...      finalized profiles (see routes::profile)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/onboarding", onboarding::router())
        .nest("/profiles", profile::router())
}
