//! Cross-entity substring search.

use sqlx::PgPool;

use crate::models::search::SearchHit;

/// One `UNION ALL` branch per searchable entity type. Each branch is
/// switched on by membership of its type in `$2` and matches `$1` with
/// `ILIKE` (backslash is the default escape character).
const SEARCH_QUERY: &str = "
    SELECT * FROM (
        SELECT 'dog' AS entity_type, id AS entity_id, name AS title,
               NULLIF(CONCAT_WS(', ', breed, registration_number), '') AS subtitle
        FROM dogs
        WHERE 'dog' = ANY($2)
          AND (name ILIKE $1 OR call_name ILIKE $1
               OR registration_number ILIKE $1 OR microchip_number ILIKE $1)
        UNION ALL
        SELECT 'litter', l.id, COALESCE(l.name, 'Litter #' || l.id),
               NULLIF(CONCAT_WS(' x ', d.name, s.name), '')
        FROM litters l
        LEFT JOIN dogs d ON d.id = l.dam_id
        LEFT JOIN dogs s ON s.id = l.sire_id
        WHERE 'litter' = ANY($2)
          AND (l.name ILIKE $1 OR d.name ILIKE $1 OR s.name ILIKE $1)
        UNION ALL
        SELECT 'puppy', id, COALESCE(name, collar_color, 'Puppy #' || id), status
        FROM puppies
        WHERE 'puppy' = ANY($2)
          AND (name ILIKE $1 OR collar_color ILIKE $1 OR color ILIKE $1)
        UNION ALL
        SELECT 'customer', id, CONCAT_WS(' ', first_name, last_name), email
        FROM customers
        WHERE 'customer' = ANY($2)
          AND (first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1)
        UNION ALL
        SELECT 'lead', id, CONCAT_WS(' ', first_name, last_name), status
        FROM leads
        WHERE 'lead' = ANY($2)
          AND (first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1)
    ) hits
    ORDER BY title, entity_type, entity_id
    LIMIT $3";

/// Runs the search query.
pub struct SearchRepo;

impl SearchRepo {
    /// Search the given entity types for an escaped `ILIKE` pattern.
    pub async fn search(
        pool: &PgPool,
        pattern: &str,
        entity_types: &[&str],
        limit: i64,
    ) -> Result<Vec<SearchHit>, sqlx::Error> {
        let types: Vec<String> = entity_types.iter().map(|t| t.to_string()).collect();
        sqlx::query_as::<_, SearchHit>(SEARCH_QUERY)
            .bind(pattern)
            .bind(&types)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
