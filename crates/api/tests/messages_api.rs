mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, TestApp};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_customer(app: &TestApp, first_name: &str, last_name: &str) -> i64 {
    let response = post_json(
        app.router(),
        "/api/customers",
        json!({ "first_name": first_name, "last_name": last_name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_message(app: &TestApp, body: Value) -> Value {
    let response = post_json(app.router(), "/api/messages", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_message_crud_and_read_state(pool: PgPool) {
    let app = TestApp::new(pool);
    let customer_id = create_customer(&app, "Jane", "Doe").await;

    let inbound = create_message(
        &app,
        json!({
            "customer_id": customer_id,
            "direction": "inbound",
            "body": "Is the red-collar puppy still available?",
            "media_urls": ["https://example.com/yard.jpg"]
        }),
    )
    .await;
    assert_eq!(inbound["is_read"], false);
    assert_eq!(inbound["media_urls"][0], "https://example.com/yard.jpg");
    let id = inbound["id"].as_i64().unwrap();

    let outbound = create_message(
        &app,
        json!({ "customer_id": customer_id, "direction": "outbound", "body": "She is!" }),
    )
    .await;
    assert_eq!(outbound["is_read"], true);
    assert_eq!(outbound["media_urls"], json!([]));

    let response = get(app.router(), "/api/messages?unread=true").await;
    let unread = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0]["id"], id);

    let response = post_json(app.router(), &format!("/api/messages/{id}/read"), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_read"], true);

    let response = get(app.router(), "/api/messages?unread=true").await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());

    let response = post_json(app.router(), &format!("/api/messages/{id}/unread"), json!({})).await;
    assert_eq!(body_json(response).await["data"]["is_read"], false);

    let response = get(app.router(), &format!("/api/messages?customer_id={customer_id}")).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = delete(app.router(), &format!("/api/messages/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(app.router(), &format!("/api/messages/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = post_json(app.router(), &format!("/api/messages/{id}/read"), json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_conversations_count_unread_per_party(pool: PgPool) {
    let app = TestApp::new(pool);
    let customer_id = create_customer(&app, "Jane", "Doe").await;
    let response = post_json(
        app.router(),
        "/api/leads",
        json!({ "first_name": "Sam", "email": "sam@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let lead_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    for body in ["Hello", "Any news?"] {
        create_message(
            &app,
            json!({ "customer_id": customer_id, "direction": "inbound", "body": body }),
        )
        .await;
    }
    create_message(
        &app,
        json!({ "customer_id": customer_id, "direction": "outbound", "body": "Pictures attached" }),
    )
    .await;
    create_message(
        &app,
        json!({ "lead_id": lead_id, "direction": "inbound", "body": "When is the next litter?" }),
    )
    .await;

    let response = get(app.router(), "/api/messages/conversations").await;
    assert_eq!(response.status(), StatusCode::OK);
    let conversations = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(conversations.len(), 2);

    let jane = conversations
        .iter()
        .find(|c| c["customer_id"] == customer_id)
        .unwrap();
    assert_eq!(jane["display_name"], "Jane Doe");
    assert_eq!(jane["message_count"], 3);
    assert_eq!(jane["unread_count"], 2);
    assert_eq!(jane["preview"], "Pictures attached");

    let sam = conversations.iter().find(|c| c["lead_id"] == lead_id).unwrap();
    assert_eq!(sam["display_name"], "Sam");
    assert_eq!(sam["unread_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_message_validation(pool: PgPool) {
    let app = TestApp::new(pool);
    let customer_id = create_customer(&app, "Jane", "Doe").await;

    let cases = [
        json!({ "direction": "inbound", "body": "Orphan" }),
        json!({ "customer_id": customer_id, "lead_id": 1, "direction": "inbound", "body": "Both" }),
        json!({ "customer_id": customer_id, "direction": "sideways", "body": "Hi" }),
        json!({ "customer_id": customer_id, "direction": "inbound", "body": "   " }),
        json!({ "customer_id": customer_id, "direction": "inbound", "body": "Hi", "media_urls": "x.jpg" }),
    ];
    for body in cases {
        let response = post_json(app.router(), "/api/messages", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "accepted {body}");
    }

    let response = get(app.router(), "/api/messages").await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}
