use sqlx::PgPool;

/// Connect, migrate, and verify every entity table exists.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    kennel_db::health_check(&pool).await.unwrap();

    let tables = [
        "dogs",
        "litters",
        "puppies",
        "customers",
        "leads",
        "health_records",
        "vaccinations",
        "events",
        "event_rules",
        "photos",
        "messages",
        "application_forms",
        "application_questions",
        "application_submissions",
        "contracts",
        "pages",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}
