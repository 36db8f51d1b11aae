//! Route definitions for the `/daily-reports` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::daily_reports;
use crate::state::AppState;

/// Routes mounted at `/daily-reports`.
///
/// ```text
/// GET    /                               -> search
/// POST   /                               -> create
/// GET    /summary/{user_id}              -> summary
/// PUT    /comments/{comment_id}/read     -> mark_comment_read
/// GET    /{id}                           -> get_by_id
/// PUT    /{id}                           -> update
/// POST   /{id}/submit                    -> submit
/// POST   /{id}/approve                   -> approve (manager, admin)
/// POST   /{id}/reject                    -> reject (manager, admin)
/// GET    /{id}/comments                  -> list_comments
/// POST   /{id}/comments                  -> create_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(daily_reports::search).post(daily_reports::create),
        )
        .route("/summary/{user_id}", get(daily_reports::summary))
        .route(
            "/comments/{comment_id}/read",
            put(daily_reports::mark_comment_read),
        )
        .route(
            "/{id}",
            get(daily_reports::get_by_id).put(daily_reports::update),
        )
        .route("/{id}/submit", post(daily_reports::submit))
        .route("/{id}/approve", post(daily_reports::approve))
        .route("/{id}/reject", post(daily_reports::reject))
        .route(
            "/{id}/comments",
            get(daily_reports::list_comments).post(daily_reports::create_comment),
        )
}
