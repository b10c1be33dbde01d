//! The at-most-one-cover invariant for photos.

use kennel_db::models::dog::CreateDog;
use kennel_db::models::photo::NewPhoto;
use kennel_db::repositories::{DogRepo, PhotoRepo};
use sqlx::PgPool;

async fn create_dog(pool: &PgPool) -> i64 {
    DogRepo::create(
        pool,
        &CreateDog {
            name: "Bella".to_string(),
            call_name: None,
            breed: None,
            gender: "female".to_string(),
            color: None,
            date_of_birth: None,
            registration_number: None,
            microchip_number: None,
            status: None,
            is_breeding: None,
            dam_id: None,
            sire_id: None,
            weight_lbs: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn photo(entity_id: i64, name: &str, is_cover: Option<bool>) -> NewPhoto {
    NewPhoto {
        entity_type: "dog".to_string(),
        entity_id,
        url: format!("/uploads/photos/{name}"),
        file_name: name.to_string(),
        caption: None,
        is_cover,
        width: Some(800),
        height: Some(600),
        content_type: Some("image/jpeg".to_string()),
        size_bytes: Some(1024),
    }
}

async fn cover_ids(pool: &PgPool, entity_id: i64) -> Vec<i64> {
    PhotoRepo::list_for_entity(pool, "dog", entity_id)
        .await
        .unwrap()
        .into_iter()
        .filter(|p| p.is_cover)
        .map(|p| p.id)
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_photo_becomes_cover(pool: PgPool) {
    let dog_id = create_dog(&pool).await;
    let first = PhotoRepo::create(&pool, &photo(dog_id, "a.jpg", None)).await.unwrap();
    let second = PhotoRepo::create(&pool, &photo(dog_id, "b.jpg", None)).await.unwrap();

    assert!(first.is_cover);
    assert!(!second.is_cover);
    assert_eq!(first.sort_order, 0);
    assert_eq!(second.sort_order, 1);
    assert_eq!(cover_ids(&pool, dog_id).await, vec![first.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_cover_clears_previous(pool: PgPool) {
    let dog_id = create_dog(&pool).await;
    PhotoRepo::create(&pool, &photo(dog_id, "a.jpg", None)).await.unwrap();
    PhotoRepo::create(&pool, &photo(dog_id, "b.jpg", None)).await.unwrap();
    let third = PhotoRepo::create(&pool, &photo(dog_id, "c.jpg", Some(true)))
        .await
        .unwrap();

    assert!(third.is_cover);
    assert_eq!(cover_ids(&pool, dog_id).await, vec![third.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_cover_moves_flag(pool: PgPool) {
    let dog_id = create_dog(&pool).await;
    PhotoRepo::create(&pool, &photo(dog_id, "a.jpg", None)).await.unwrap();
    let second = PhotoRepo::create(&pool, &photo(dog_id, "b.jpg", None)).await.unwrap();

    let updated = PhotoRepo::set_cover(&pool, second.id).await.unwrap().unwrap();
    assert!(updated.is_cover);
    assert_eq!(cover_ids(&pool, dog_id).await, vec![second.id]);

    // Listing puts the cover first.
    let listed = PhotoRepo::list_for_entity(&pool, "dog", dog_id).await.unwrap();
    assert_eq!(listed[0].id, second.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_cover_promotes_lowest_sort_order(pool: PgPool) {
    let dog_id = create_dog(&pool).await;
    let first = PhotoRepo::create(&pool, &photo(dog_id, "a.jpg", None)).await.unwrap();
    let second = PhotoRepo::create(&pool, &photo(dog_id, "b.jpg", None)).await.unwrap();
    let third = PhotoRepo::create(&pool, &photo(dog_id, "c.jpg", None)).await.unwrap();

    PhotoRepo::reorder(&pool, "dog", dog_id, &[first.id, third.id, second.id])
        .await
        .unwrap();

    let deleted = PhotoRepo::delete(&pool, first.id).await.unwrap().unwrap();
    assert!(deleted.is_cover);
    assert_eq!(cover_ids(&pool, dog_id).await, vec![third.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_unique_index_rejects_second_cover(pool: PgPool) {
    let dog_id = create_dog(&pool).await;
    let first = PhotoRepo::create(&pool, &photo(dog_id, "a.jpg", None)).await.unwrap();
    let second = PhotoRepo::create(&pool, &photo(dog_id, "b.jpg", None)).await.unwrap();
    assert!(first.is_cover);

    let err = sqlx::query("UPDATE photos SET is_cover = true WHERE id = $1")
        .bind(second.id)
        .execute(&pool)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db) => {
            assert_eq!(db.code().as_deref(), Some("23505"));
            assert_eq!(db.constraint(), Some("uq_photos_cover"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}
