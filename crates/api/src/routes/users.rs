//! Route definitions for the `/users` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                   -> list (admin)
/// GET    /me                 -> me
/// PUT    /me                 -> update_me
/// PUT    /me/password        -> change_password
/// GET    /me/subordinates    -> subordinates
/// GET    /{id}               -> get_by_id (admin)
/// PUT    /{id}               -> update (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/me", get(users::me).put(users::update_me))
        .route("/me/password", put(users::change_password))
        .route("/me/subordinates", get(users::subordinates))
        .route("/{id}", get(users::get_by_id).put(users::update))
}
