//! HTTP-level integration tests for the onboarding session orchestrator.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router
//! without an actual TCP listener.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{body_json, get, post, post_json, send, token_for};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Step payload fixtures
// ---------------------------------------------------------------------------

fn personal_info() -> serde_json::Value {
    json!({
        "full_name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+33123456789",
        "location": "Paris, France",
    })
}

fn profile_description() -> serde_json::Value {
    json!({ "description": "Backend engineer who cares about reliability." })
}

fn professional_info() -> serde_json::Value {
    json!({
        "desired_position": "Senior Backend Engineer",
        "years_experience": 8,
        "skills": ["Rust", "PostgreSQL"],
    })
}

fn cv_upload() -> serde_json::Value {
    json!({
        "file_name": "jane-doe-cv.pdf",
        "file_url": "https://files.example.com/cv/jane-doe-cv.pdf",
    })
}

fn job_description() -> serde_json::Value {
    json!({
        "title": "Senior Backend Engineer",
        "company": "Acme",
        "description": "Own the payments platform end to end.",
    })
}

/// All five step payloads in submission order.
fn ordered_payloads() -> [(&'static str, serde_json::Value); 5] {
    [
        ("personal_info", personal_info()),
        ("profile_description", profile_description()),
        ("professional_info", professional_info()),
        ("cv_upload", cv_upload()),
        ("job_description", job_description()),
    ]
}

/// Start a session for the user and return its id.
async fn start_session(pool: &PgPool, token: &str) -> i64 {
    let response = post(common::build_test_app(pool.clone()), "/api/v1/onboarding/start", token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Submit a step payload for the user's active session.
async fn submit(pool: &PgPool, token: &str, step: &str, payload: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/onboarding/steps/{step}"),
        token,
        payload,
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Start
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn start_creates_session_at_first_step(pool: PgPool) {
    let token = token_for(1);
    let response = post(common::build_test_app(pool), "/api/v1/onboarding/start", &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], 1);
    assert_eq!(json["data"]["current_step"], "personal_info");
    assert_eq!(json["data"]["status"], "in_progress");
    assert_eq!(json["data"]["completed_steps"], json!([]));
    assert_eq!(json["data"]["data"], json!({}));
    assert!(json["data"]["completed_at"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn starting_twice_is_a_duplicate_session(pool: PgPool) {
    let token = token_for(1);
    start_session(&pool, &token).await;

    let response = post(common::build_test_app(pool), "/api/v1/onboarding/start", &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_SESSION");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn start_without_token_is_unauthorized(pool: PgPool) {
    let response = send(
        common::build_test_app(pool),
        Method::POST,
        "/api/v1/onboarding/start",
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Step submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submitting_personal_info_advances_the_session(pool: PgPool) {
    let token = token_for(1);
    start_session(&pool, &token).await;

    let (status, json) = submit(&pool, &token, "personal_info", personal_info()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["current_step"], "profile_description");
    assert_eq!(json["data"]["completed_steps"], json!(["personal_info"]));
    assert_eq!(json["data"]["data"]["personal_info"]["full_name"], "Jane Doe");
    assert_eq!(json["data"]["status"], "in_progress");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn resubmitting_a_completed_step_fails_with_invalid_step_order(pool: PgPool) {
    let token = token_for(1);
    start_session(&pool, &token).await;

    submit(&pool, &token, "personal_info", personal_info()).await;
    let (status, _) = submit(&pool, &token, "profile_description", profile_description()).await;
    assert_eq!(status, StatusCode::OK);

    // Session is now on professional_info; personal_info comes back.
    let (status, json) = submit(&pool, &token, "personal_info", personal_info()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_STEP_ORDER");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_order_submission_leaves_the_session_unchanged(pool: PgPool) {
    let token = token_for(1);
    let session_id = start_session(&pool, &token).await;

    let (status, json) = submit(&pool, &token, "professional_info", professional_info()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_STEP_ORDER");

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/onboarding/{session_id}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_step"], "personal_info");
    assert_eq!(json["data"]["completed_steps"], json!([]));
    assert_eq!(json["data"]["data"], json!({}));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_payload_lists_every_violated_field(pool: PgPool) {
    let token = token_for(1);
    let session_id = start_session(&pool, &token).await;

    let (status, json) = submit(
        &pool,
        &token,
        "personal_info",
        json!({
            "full_name": "Jane Doe",
            "email": "not-an-email",
            "phone": "+33123456789",
            "location": "Paris, France",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email"]);

    // The session is otherwise unchanged.
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/onboarding/{session_id}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["completed_steps"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_step_key_is_a_validation_error(pool: PgPool) {
    let token = token_for(1);
    start_session(&pool, &token).await;

    let (status, json) = submit(&pool, &token, "summary", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submitting_without_an_active_session_is_not_found(pool: PgPool) {
    let token = token_for(1);
    let (status, json) = submit(&pool, &token, "personal_info", personal_info()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Completion and finalization
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn full_flow_completes_and_finalize_is_idempotent(pool: PgPool) {
    let token = token_for(1);
    let session_id = start_session(&pool, &token).await;

    let mut last = json!(null);
    for (step, payload) in ordered_payloads() {
        let (status, json) = submit(&pool, &token, step, payload).await;
        assert_eq!(status, StatusCode::OK, "step {step} failed: {json}");
        last = json;
    }

    assert_eq!(last["data"]["status"], "completed");
    assert_eq!(last["data"]["current_step"], "job_description");
    assert_eq!(last["data"]["completed_steps"].as_array().unwrap().len(), 5);
    assert!(!last["data"]["completed_at"].is_null());

    // Finalize: the profile merges fields from all five steps.
    let response = post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/onboarding/{session_id}/finalize"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["data"]["full_name"], "Jane Doe");
    assert_eq!(first["data"]["email"], "jane@example.com");
    assert_eq!(first["data"]["desired_position"], "Senior Backend Engineer");
    assert_eq!(first["data"]["cv_file_name"], "jane-doe-cv.pdf");
    assert_eq!(first["data"]["job_company"], "Acme");

    // A second finalize returns the same profile, no duplicate.
    let response = post(
        common::build_test_app(pool),
        &format!("/api/v1/onboarding/{session_id}/finalize"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(second["data"]["id"], first["data"]["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn finalize_before_completion_is_a_conflict(pool: PgPool) {
    let token = token_for(1);
    let session_id = start_session(&pool, &token).await;
    submit(&pool, &token, "personal_info", personal_info()).await;

    let response = post(
        common::build_test_app(pool),
        &format!("/api/v1/onboarding/{session_id}/finalize"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Session reads and ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_unknown_session_is_not_found(pool: PgPool) {
    let token = token_for(1);
    let response = get(common::build_test_app(pool), "/api/v1/onboarding/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn another_users_session_is_forbidden(pool: PgPool) {
    let owner = token_for(1);
    let session_id = start_session(&pool, &owner).await;

    let intruder = token_for(2);
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/onboarding/{session_id}"),
        &intruder,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Abandonment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn abandoning_frees_the_user_for_a_new_session(pool: PgPool) {
    let token = token_for(1);
    let session_id = start_session(&pool, &token).await;

    let response = post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/onboarding/{session_id}/abandon"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "abandoned");

    // The single-active-session policy only counts in-progress sessions.
    start_session(&pool, &token).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn abandoning_a_completed_session_is_a_conflict(pool: PgPool) {
    let token = token_for(1);
    let session_id = start_session(&pool, &token).await;
    for (step, payload) in ordered_payloads() {
        submit(&pool, &token, step, payload).await;
    }

    let response = post(
        common::build_test_app(pool),
        &format!("/api/v1/onboarding/{session_id}/abandon"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Generation collaborator
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn suggestion_returns_text_without_touching_the_session(pool: PgPool) {
    let token = token_for(1);
    let session_id = start_session(&pool, &token).await;
    submit(&pool, &token, "personal_info", personal_info()).await;

    let response = post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/onboarding/{session_id}/suggest-description"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let suggestion = json["data"]["suggestion"].as_str().unwrap();
    assert!(suggestion.starts_with("[generated]"));

    // The suggestion is not merged into the data bag.
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/onboarding/{session_id}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"]["data"].get("profile_description").is_none());
    assert_eq!(json["data"]["completed_steps"], json!(["personal_info"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn generator_failure_is_retryable_and_state_preserving(pool: PgPool) {
    let token = token_for(1);
    let session_id = start_session(&pool, &token).await;
    submit(&pool, &token, "personal_info", personal_info()).await;

    let failing_app =
        common::build_test_app_with(pool.clone(), Arc::new(common::FailingGenerator));
    let response = post(
        failing_app,
        &format!("/api/v1/onboarding/{session_id}/suggest-description"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "GENERATION_FAILED");

    // Session state is untouched by the failure.
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/onboarding/{session_id}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "in_progress");
    assert_eq!(json["data"]["completed_steps"], json!(["personal_info"]));
}
