pub mod auth;
pub mod daily_reports;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                               login (POST)
/// /auth/register                            self-registration (POST)
/// /auth/refresh                             token refresh (POST)
///
/// /users                                    search (GET, admin)
/// /users/me                                 profile (GET, PUT)
/// /users/me/password                        change password (PUT)
/// /users/me/subordinates                    direct reports (GET)
/// /users/{id}                               get, update (GET, PUT, admin)
///
/// /daily-reports                            search, create (GET, POST)
/// /daily-reports/summary/{user_id}          period summary (GET)
/// /daily-reports/comments/{id}/read         mark comment read (PUT)
/// /daily-reports/{id}                       get, update (GET, PUT)
/// /daily-reports/{id}/submit                submit (POST)
/// /daily-reports/{id}/approve               approve (POST)
/// /daily-reports/{id}/reject                reject (POST)
/// /daily-reports/{id}/comments              list, create (GET, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/daily-reports", daily_reports::router())
}
