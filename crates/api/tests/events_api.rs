//! Calendar events, event rules and rules fired by other resources.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, create_dog, delete, get, post_json, put_json, TestApp};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_rule(app: &TestApp, body: Value) -> i64 {
    let response = post_json(app.router(), "/api/events/rules", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn list_events(app: &TestApp, query: &str) -> Vec<Value> {
    let response = get(app.router(), &format!("/api/events?{query}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].as_array().unwrap().clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_crud_and_completion(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = post_json(
        app.router(),
        "/api/events",
        json!({ "title": "Dog show", "event_type": "show", "event_date": "2026-05-02" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let event = body_json(response).await["data"].clone();
    assert_eq!(event["is_completed"], false);
    let id = event["id"].as_i64().unwrap();

    let response = post_json(
        app.router(),
        "/api/events",
        json!({ "title": "Vet visit", "event_type": "vet", "event_date": "2026-07-15" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let in_may = list_events(&app, "start=2026-05-01&end=2026-05-31").await;
    assert_eq!(in_may.len(), 1);
    assert_eq!(in_may[0]["title"], "Dog show");

    let response = put_json(
        app.router(),
        &format!("/api/events/{id}"),
        json!({ "title": "Regional dog show" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["title"], "Regional dog show");

    let uri = format!("/api/events/{id}/complete");
    let response = post_json(app.router(), &uri, json!({})).await;
    assert_eq!(body_json(response).await["data"]["is_completed"], true);
    let response = post_json(app.router(), &uri, json!({})).await;
    assert_eq!(body_json(response).await["data"]["is_completed"], false);

    let response = delete(app.router(), &format!("/api/events/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(app.router(), &format!("/api/events/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_validation(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = post_json(
        app.router(),
        "/api/events",
        json!({ "title": "Trip", "event_date": "2026-05-10", "end_date": "2026-05-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.router(),
        "/api/events",
        json!({ "title": "Party", "event_type": "party", "event_date": "2026-05-10" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app.router(), "/api/events?start=2026-06-01&end=2026-05-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rule_crud_and_validation(pool: PgPool) {
    let app = TestApp::new(pool);

    let id = create_rule(
        &app,
        json!({
            "name": "Booster reminder",
            "trigger_type": "vaccination_recorded",
            "action_type": "create_event",
            "action_config": { "title": "Booster for {name}", "offset_days": 21 }
        }),
    )
    .await;

    let response = post_json(
        app.router(),
        "/api/events/rules",
        json!({
            "name": "Bad operator",
            "trigger_type": "dog_added",
            "conditions": { "breed": { "like": "Lab%" } },
            "action_type": "create_event",
            "action_config": { "title": "x" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.router(),
        "/api/events/rules",
        json!({
            "name": "Far future",
            "trigger_type": "litter_bred",
            "action_type": "create_event",
            "action_config": { "title": "Someday", "offset_days": 1_000_000_000 }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Milestones need a litter trigger; the merged rule is checked.
    let response = put_json(
        app.router(),
        &format!("/api/events/rules/{id}"),
        json!({ "action_type": "create_milestones" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        app.router(),
        &format!("/api/events/rules/{id}"),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_active"], false);

    let response = get(app.router(), "/api/events/rules?trigger_type=vaccination_recorded").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = delete(app.router(), &format!("/api/events/rules/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(app.router(), &format!("/api/events/rules/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_litter_create_fires_bred_rule(pool: PgPool) {
    let app = TestApp::new(pool);
    let rule_id = create_rule(
        &app,
        json!({
            "name": "Progesterone",
            "trigger_type": "litter_bred",
            "action_type": "create_event",
            "action_config": { "title": "Progesterone check for {name}", "offset_days": 10, "event_type": "vet" }
        }),
    )
    .await;

    let dam_id = create_dog(&app, "Bella", "female").await;
    let response = post_json(
        app.router(),
        "/api/litters",
        json!({ "name": "Spring", "dam_id": dam_id, "breeding_date": "2026-01-10" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let litter_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let events = list_events(&app, &format!("litter_id={litter_id}")).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Progesterone check for Spring");
    assert_eq!(events[0]["event_date"], "2026-01-20");
    assert_eq!(events[0]["event_type"], "vet");
    assert_eq!(events[0]["rule_id"], rule_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rule_past_calendar_end_does_not_fail_the_write(pool: PgPool) {
    let app = TestApp::new(pool);
    create_rule(
        &app,
        json!({
            "name": "Ten years on",
            "trigger_type": "litter_bred",
            "action_type": "create_event",
            "action_config": { "title": "Anniversary", "offset_days": 3650 }
        }),
    )
    .await;

    let dam_id = create_dog(&app, "Clover", "female").await;
    let response = post_json(
        app.router(),
        "/api/litters",
        json!({ "name": "Distant", "dam_id": dam_id, "breeding_date": "+262142-06-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let litter_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    assert!(list_events(&app, &format!("litter_id={litter_id}")).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dog_added_rule_respects_conditions(pool: PgPool) {
    let app = TestApp::new(pool);
    create_rule(
        &app,
        json!({
            "name": "Register females",
            "trigger_type": "dog_added",
            "conditions": { "gender": "female" },
            "action_type": "create_event",
            "action_config": { "title": "Register {name}" }
        }),
    )
    .await;

    let female = create_dog(&app, "Daisy", "female").await;
    let male = create_dog(&app, "Rocky", "male").await;

    let events = list_events(&app, &format!("dog_id={female}")).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Register Daisy");
    assert_eq!(
        events[0]["event_date"],
        Utc::now().date_naive().to_string()
    );

    assert!(list_events(&app, &format!("dog_id={male}")).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vaccination_rule_schedules_booster(pool: PgPool) {
    let app = TestApp::new(pool);
    create_rule(
        &app,
        json!({
            "name": "Booster",
            "trigger_type": "vaccination_recorded",
            "action_type": "create_event",
            "action_config": { "title": "Booster for {name}", "offset_days": 21, "event_type": "vaccination" }
        }),
    )
    .await;
    let dog_id = create_dog(&app, "Rex", "male").await;

    let response = post_json(
        app.router(),
        "/api/health/vaccinations",
        json!({ "dog_id": dog_id, "vaccine_name": "DHPP", "administered_date": "2026-04-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let events = list_events(&app, &format!("dog_id={dog_id}&event_type=vaccination")).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Booster for Rex");
    assert_eq!(events[0]["event_date"], "2026-04-22");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_run_and_preview_rules(pool: PgPool) {
    let app = TestApp::new(pool);
    let rule_id = create_rule(
        &app,
        json!({
            "name": "Puppy pack",
            "trigger_type": "puppy_sold",
            "action_type": "create_event",
            "action_config": { "title": "Send puppy pack to {name}'s family", "offset_days": 3 }
        }),
    )
    .await;
    let litter_id = common::create_litter(&app, "Summer").await;
    let response = post_json(
        app.router(),
        "/api/puppies",
        json!({ "litter_id": litter_id, "name": "Nutmeg", "gender": "female" }),
    )
    .await;
    let puppy_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let in_three_days = (Utc::now().date_naive() + Duration::days(3)).to_string();

    let response = post_json(
        app.router(),
        &format!("/api/events/rules/{rule_id}/preview"),
        json!({ "puppy_id": puppy_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let preview = body_json(response).await["data"].clone();
    assert_eq!(preview["matches"], true);
    assert_eq!(preview["events"][0]["title"], "Send puppy pack to Nutmeg's family");
    assert_eq!(preview["events"][0]["event_date"], in_three_days.as_str());

    // Preview writes nothing.
    let response = post_json(
        app.router(),
        "/api/events/rules/run",
        json!({ "trigger_type": "puppy_sold", "puppy_id": puppy_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["puppy_id"], puppy_id);

    // A second run finds the event already on the calendar.
    let response = post_json(
        app.router(),
        "/api/events/rules/run",
        json!({ "trigger_type": "puppy_sold", "puppy_id": puppy_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());

    let response = post_json(
        app.router(),
        "/api/events/rules/run",
        json!({ "trigger_type": "puppy_sold" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.router(),
        "/api/events/rules/999999/preview",
        json!({ "puppy_id": puppy_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
