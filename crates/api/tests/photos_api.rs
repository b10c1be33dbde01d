//! Photo upload and cover-photo behaviour through the HTTP layer.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_dog, delete, get, post_json, post_multipart, put_json, PNG_1X1, TestApp,
};
use serde_json::json;
use sqlx::PgPool;

async fn upload(app: &TestApp, dog_id: i64, is_cover: Option<&str>) -> serde_json::Value {
    let dog_id = dog_id.to_string();
    let mut fields = vec![("entity_type", "dog"), ("entity_id", dog_id.as_str())];
    if let Some(flag) = is_cover {
        fields.push(("is_cover", flag));
    }
    let response = post_multipart(app.router(), "/api/photos", &fields, ("pup.png", PNG_1X1)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn covers(app: &TestApp, dog_id: i64) -> Vec<i64> {
    let response = get(app.router(), &format!("/api/photos?entity_type=dog&entity_id={dog_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["is_cover"] == true)
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_reads_dimensions_and_stores_file(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Juniper", "female").await;

    let photo = upload(&app, dog_id, None).await;

    assert_eq!(photo["width"], 1);
    assert_eq!(photo["height"], 1);
    assert_eq!(photo["content_type"], "image/png");
    assert_eq!(photo["is_cover"], true, "first photo becomes cover");

    let url = photo["url"].as_str().unwrap();
    let relative = url.strip_prefix("/uploads/").unwrap();
    assert!(app.uploads.path().join(relative).is_file());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cover_upload_clears_other_covers(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Hazel", "female").await;

    let first = upload(&app, dog_id, None).await;
    let second = upload(&app, dog_id, Some("false")).await;
    assert_eq!(second["is_cover"], false);
    assert_eq!(covers(&app, dog_id).await, vec![first["id"].as_i64().unwrap()]);

    let third = upload(&app, dog_id, Some("true")).await;
    assert_eq!(covers(&app, dog_id).await, vec![third["id"].as_i64().unwrap()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_cover_promotes_next_photo(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Olive", "female").await;

    let first = upload(&app, dog_id, None).await;
    let second = upload(&app, dog_id, None).await;

    let response = delete(app.router(), &format!("/api/photos/{}", first["id"])).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(covers(&app, dog_id).await, vec![second["id"].as_i64().unwrap()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_cover_endpoint(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Sage", "female").await;
    let _first = upload(&app, dog_id, None).await;
    let second = upload(&app, dog_id, None).await;

    let response = post_json(
        app.router(),
        &format!("/api/photos/{}/cover", second["id"]),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(covers(&app, dog_id).await, vec![second["id"].as_i64().unwrap()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rejects_non_images_and_missing_entities(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Ivy", "female").await;
    let id = dog_id.to_string();

    let response = post_multipart(
        app.router(),
        "/api/photos",
        &[("entity_type", "dog"), ("entity_id", id.as_str())],
        ("notes.txt", b"hello"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_multipart(
        app.router(),
        "/api/photos",
        &[("entity_type", "dog"), ("entity_id", "999999")],
        ("pup.png", PNG_1X1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_after_max_sort_order_appends(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Maple", "female").await;
    let first = upload(&app, dog_id, None).await;

    let response = put_json(
        app.router(),
        &format!("/api/photos/{}", first["id"]),
        json!({ "sort_order": i32::MAX }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let second = upload(&app, dog_id, None).await;
    assert_eq!(second["sort_order"], i32::MAX);
    assert_eq!(second["is_cover"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_photos(pool: PgPool) {
    let app = TestApp::new(pool);
    let dog_id = create_dog(&app, "Willow", "female").await;
    let a = upload(&app, dog_id, None).await["id"].as_i64().unwrap();
    let b = upload(&app, dog_id, None).await["id"].as_i64().unwrap();
    let c = upload(&app, dog_id, None).await["id"].as_i64().unwrap();

    let response = put_json(
        app.router(),
        "/api/photos/reorder",
        json!({ "entity_type": "dog", "entity_id": dog_id, "photo_ids": [c, a, b] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let photos = body_json(response).await["data"].as_array().unwrap().clone();
    let order_of = |id: i64| {
        photos
            .iter()
            .find(|p| p["id"] == id)
            .map(|p| p["sort_order"].as_i64().unwrap())
            .unwrap()
    };
    assert_eq!((order_of(c), order_of(a), order_of(b)), (0, 1, 2));

    let response = put_json(
        app.router(),
        "/api/photos/reorder",
        json!({ "entity_type": "dog", "entity_id": dog_id, "photo_ids": [a, b] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
