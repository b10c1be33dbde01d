//! Route definitions for application forms and submissions.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Application routes mounted at `/applications`.
///
/// ```text
/// GET, POST          /forms                      -> list_forms, create_form
/// GET, PUT, DELETE   /forms/{id}                 -> get_form (public), update_form, delete_form
/// POST               /forms/{id}/questions       -> create_question
/// POST               /forms/{id}/submit          -> submit (public)
/// PUT, DELETE        /questions/{id}             -> update_question, delete_question
/// GET                /submissions                -> list_submissions
/// GET, DELETE        /submissions/{id}           -> get_submission, delete_submission
/// PUT                /submissions/{id}/status    -> update_submission_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/forms",
            get(applications::list_forms).post(applications::create_form),
        )
        .route(
            "/forms/{id}",
            get(applications::get_form)
                .put(applications::update_form)
                .delete(applications::delete_form),
        )
        .route(
            "/forms/{id}/questions",
            post(applications::create_question),
        )
        .route("/forms/{id}/submit", post(applications::submit))
        .route(
            "/questions/{id}",
            put(applications::update_question).delete(applications::delete_question),
        )
        .route("/submissions", get(applications::list_submissions))
        .route(
            "/submissions/{id}",
            get(applications::get_submission).delete(applications::delete_submission),
        )
        .route(
            "/submissions/{id}/status",
            put(applications::update_submission_status),
        )
}
