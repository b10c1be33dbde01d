mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, create_dog, create_litter, get, post_json, put_json, TestApp};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_record_for_dog(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Bella", "female").await;

    let response = post_json(
        app.router(),
        "/api/health/records",
        json!({
            "dog_id": dog_id,
            "record_type": "illness",
            "title": "Kennel cough",
            "record_date": "2026-02-03",
            "symptoms": ["cough", "lethargy"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = body_json(response).await["data"].clone();
    assert_eq!(record["symptoms"], json!(["cough", "lethargy"]));
    assert_eq!(record["puppy_id"], serde_json::Value::Null);
    let id = record["id"].as_i64().unwrap();

    let response = put_json(
        app.router(),
        &format!("/api/health/records/{id}"),
        json!({ "results": "Cleared after antibiotics" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.router(), &format!("/api/health/records?dog_id={dog_id}")).await;
    let records = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["results"], "Cleared after antibiotics");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_record_needs_exactly_one_subject(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Bella", "female").await;
    let litter_id = create_litter(&app, "Spring").await;
    let response = post_json(
        app.router(),
        "/api/puppies",
        json!({ "litter_id": litter_id, "gender": "male", "collar_color": "red" }),
    )
    .await;
    let puppy_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let base = json!({ "record_type": "exam", "title": "Checkup", "record_date": "2026-02-03" });
    for subject in [json!({}), json!({ "dog_id": dog_id, "puppy_id": puppy_id })] {
        let mut body = base.clone();
        body.as_object_mut()
            .unwrap()
            .extend(subject.as_object().unwrap().clone());
        let response = post_json(app.router(), "/api/health/records", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    let mut body = base.clone();
    body["puppy_id"] = json!(puppy_id);
    let response = post_json(app.router(), "/api/health/records", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_record_rejects_bad_symptoms_and_type(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Bella", "female").await;

    let cases = [
        json!({ "symptoms": "cough" }),
        json!({ "symptoms": ["cough", ""] }),
        json!({ "symptoms": [3] }),
        json!({ "record_type": "grooming" }),
    ];
    for overrides in cases {
        let mut body = json!({
            "dog_id": dog_id,
            "record_type": "illness",
            "title": "Sniffles",
            "record_date": "2026-02-03"
        });
        body.as_object_mut()
            .unwrap()
            .extend(overrides.as_object().unwrap().clone());
        let response = post_json(app.router(), "/api/health/records", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "accepted {overrides}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vaccination_validation(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Rex", "male").await;

    let response = post_json(
        app.router(),
        "/api/health/vaccinations",
        json!({
            "dog_id": dog_id,
            "vaccine_name": "Rabies",
            "administered_date": "2026-03-01",
            "next_due_date": "2026-02-01"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.router(),
        "/api/health/vaccinations",
        json!({ "vaccine_name": "Rabies", "administered_date": "2026-03-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_due_vaccinations_labels_overdue_and_due_soon(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Rex", "male").await;
    let today = Utc::now().date_naive();

    let schedule = [
        ("Rabies", today - Duration::days(365), Some(today - Duration::days(5))),
        ("DHPP", today - Duration::days(20), Some(today + Duration::days(10))),
        ("Lepto", today, Some(today + Duration::days(200))),
        ("Bordetella", today, None),
    ];
    for (vaccine, administered, next_due) in schedule {
        let response = post_json(
            app.router(),
            "/api/health/vaccinations",
            json!({
                "dog_id": dog_id,
                "vaccine_name": vaccine,
                "administered_date": administered,
                "next_due_date": next_due
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app.router(), "/api/health/vaccinations/due").await;
    assert_eq!(response.status(), StatusCode::OK);
    let due = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(due.len(), 2);
    assert_eq!(due[0]["vaccine_name"], "Rabies");
    assert_eq!(due[0]["due_state"], "overdue");
    assert_eq!(due[0]["subject_name"], "Rex");
    assert_eq!(due[1]["vaccine_name"], "DHPP");
    assert_eq!(due[1]["due_state"], "due_soon");

    let response = get(app.router(), "/api/health/vaccinations/due?within_days=365").await;
    let due = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(due.len(), 3);
    assert_eq!(due[2]["vaccine_name"], "Lepto");
    assert_eq!(due[2]["due_state"], "due_soon");
}
