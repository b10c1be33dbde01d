//! Application forms and public submissions.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_public, post_json, post_json_public, put_json, TestApp};
use serde_json::json;
use sqlx::PgPool;

/// Create a form with one required and one optional question.
async fn create_form(app: &TestApp) -> (i64, i64, i64) {
    let response = post_json(
        app.router(),
        "/api/applications/forms",
        json!({ "name": "Puppy application", "is_active": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let form_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let questions = format!("/api/applications/forms/{form_id}/questions");
    let response = post_json(
        app.router(),
        &questions,
        json!({ "question_text": "Do you have a fenced yard?", "question_type": "radio",
                "options": ["Yes", "No"], "is_required": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let yard = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        app.router(),
        &questions,
        json!({ "question_text": "Anything else?", "is_required": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let extra = body_json(response).await["data"]["id"].as_i64().unwrap();

    (form_id, yard, extra)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_form_lists_questions_in_order(pool: PgPool) {
    let app = TestApp::new(pool);
    let (form_id, yard, extra) = create_form(&app).await;

    let response = get_public(app.router(), &format!("/api/applications/forms/{form_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![yard, extra]);
    assert_eq!(json["data"]["name"], "Puppy application");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submission_missing_required_answer_returns_400(pool: PgPool) {
    let app = TestApp::new(pool);
    let (form_id, _yard, extra) = create_form(&app).await;

    let response = post_json_public(
        app.router(),
        &format!("/api/applications/forms/{form_id}/submit"),
        json!({
            "applicant_name": "Sam Rivera",
            "applicant_email": "sam@example.com",
            "responses": { extra.to_string(): "We love dogs" }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_ANSWERS");
    assert_eq!(json["details"]["missing"], json!(["Do you have a fenced yard?"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_complete_submission_is_stored_pending(pool: PgPool) {
    let app = TestApp::new(pool);
    let (form_id, yard, _extra) = create_form(&app).await;

    let response = post_json_public(
        app.router(),
        &format!("/api/applications/forms/{form_id}/submit"),
        json!({
            "applicant_name": "Sam Rivera",
            "applicant_email": "Sam@Example.com",
            "responses": { yard.to_string(): "Yes" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let submission = body_json(response).await["data"].clone();
    assert_eq!(submission["status"], "pending");
    assert_eq!(submission["applicant_email"], "sam@example.com");

    let response = put_json(
        app.router(),
        &format!("/api/applications/submissions/{}/status", submission["id"]),
        json!({ "status": "approved", "notes": "Great home" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let reviewed = body_json(response).await["data"].clone();
    assert_eq!(reviewed["status"], "approved");
    assert!(reviewed["reviewed_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_select_answer_must_be_an_option(pool: PgPool) {
    let app = TestApp::new(pool);
    let (form_id, yard, _extra) = create_form(&app).await;

    let response = post_json_public(
        app.router(),
        &format!("/api/applications/forms/{form_id}/submit"),
        json!({
            "applicant_name": "Sam Rivera",
            "applicant_email": "sam@example.com",
            "responses": { yard.to_string(): "Maybe" }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_form_rejects_submissions(pool: PgPool) {
    let app = TestApp::new(pool);
    let (form_id, yard, _extra) = create_form(&app).await;

    let response = put_json(
        app.router(),
        &format!("/api/applications/forms/{form_id}"),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_public(
        app.router(),
        &format!("/api/applications/forms/{form_id}/submit"),
        json!({
            "applicant_name": "Sam Rivera",
            "applicant_email": "sam@example.com",
            "responses": { yard.to_string(): "Yes" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
