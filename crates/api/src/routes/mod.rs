pub mod applications;
pub mod contracts;
pub mod customers;
pub mod dogs;
pub mod events;
pub mod health;
pub mod health_records;
pub mod leads;
pub mod litters;
pub mod messages;
pub mod pages;
pub mod photos;
pub mod puppies;
pub mod search;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dogs                                   list, create
/// /dogs/{id}                              get, update, delete
/// /dogs/{id}/litters                      litters as dam or sire
/// /dogs/{id}/health                       health records + vaccinations
///
/// /litters                                list, create
/// /litters/{id}                           get (with puppies), update, delete
/// /litters/{id}/puppies                   puppies of the litter
/// /litters/{id}/events/generate           create milestone events (POST)
///
/// /puppies                                list, create
/// /puppies/{id}                           get, update, delete
///
/// /customers                              list, create
/// /customers/{id}                         get, update, delete
/// /customers/{id}/puppies                 puppies sold or reserved
/// /customers/{id}/contracts               contracts
/// /customers/{id}/messages                message history
///
/// /leads                                  list, create
/// /leads/{id}                             get, update, delete
/// /leads/{id}/convert                     convert to customer (POST)
///
/// /health/records                         list, create
/// /health/records/{id}                    get, update, delete
/// /health/vaccinations                    list, create
/// /health/vaccinations/due                due or overdue
/// /health/vaccinations/{id}               get, update, delete
///
/// /events                                 list, create
/// /events/{id}                            get, update, delete
/// /events/{id}/complete                   toggle completion (POST)
/// /events/rules                           list, create
/// /events/rules/run                       run active rules (POST)
/// /events/rules/{id}                      get, update, delete
/// /events/rules/{id}/preview              dry run (POST)
///
/// /photos                                 list, upload
/// /photos/reorder                         reorder (PUT)
/// /photos/{id}                            get, update, delete
/// /photos/{id}/cover                      make cover (POST)
///
/// /messages                               list, create
/// /messages/conversations                 one row per contact
/// /messages/{id}                          get, delete
/// /messages/{id}/read                     mark read (POST)
/// /messages/{id}/unread                   mark unread (POST)
///
/// /applications/forms                     list, create
/// /applications/forms/{id}                get (public), update, delete
/// /applications/forms/{id}/questions      add question (POST)
/// /applications/forms/{id}/submit         submit (public, POST)
/// /applications/questions/{id}            update, delete
/// /applications/submissions               list
/// /applications/submissions/{id}          get, delete
/// /applications/submissions/{id}/status   review (PUT)
///
/// /contracts                              list, create
/// /contracts/{id}                         get, update (draft only), delete
/// /contracts/{id}/document                upload document (POST)
/// /contracts/{id}/send                    draft -> sent (POST)
/// /contracts/{id}/sign                    sent -> signed (POST)
/// /contracts/{id}/cancel                  draft|sent -> cancelled (POST)
///
/// /pages                                  list, create
/// /pages/slug/{slug}                      published page (public)
/// /pages/{id}                             get, update, delete
///
/// /search                                 cross-entity search
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Breeding program.
        .nest("/dogs", dogs::router())
        .nest("/litters", litters::router())
        .nest("/puppies", puppies::router())
        .nest("/health", health_records::router())
        // Calendar and rule engine.
        .nest("/events", events::router())
        .nest("/photos", photos::router())
        // Customer relations.
        .nest("/customers", customers::router())
        .nest("/leads", leads::router())
        .nest("/messages", messages::router())
        .nest("/applications", applications::router())
        .nest("/contracts", contracts::router())
        // Website content.
        .nest("/pages", pages::router())
        .nest("/search", search::router())
}
