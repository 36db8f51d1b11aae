//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{NaiveDate, Utc};
use http_body_util::BodyExt;
use reportflow_api::auth::jwt::{generate_access_token, JwtConfig};
use reportflow_api::auth::password::hash_password;
use reportflow_api::config::ServerConfig;
use reportflow_api::router::build_app_router;
use reportflow_api::state::AppState;
use reportflow_core::config::{ManagerScope, WorkflowConfig};
use reportflow_core::project::{Project, ProjectStatus};
use reportflow_core::roles::Role;
use reportflow_core::store::AccountStore;
use reportflow_core::types::{DepartmentId, ProjectId, UserId};
use reportflow_core::user::User;
use reportflow_db::repositories::{DepartmentRepo, ProjectRepo};
use reportflow_db::PgStore;
use sqlx::PgPool;
use tower::ServiceExt;

/// Password of every seeded user.
pub const PASSWORD: &str = "Password1";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        json_logs: false,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 30,
        },
        workflow: WorkflowConfig::default(),
    }
}

/// Build the full application router over `pool`, with the production
/// middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::new(pool, test_config()))
}

/// Like [`build_test_app`], restricting managers to their direct reports.
pub fn build_scoped_test_app(pool: PgPool) -> Router {
    let mut config = test_config();
    config.workflow.manager_scope = ManagerScope::DirectReports;
    build_app_router(AppState::new(pool, config))
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Department `d-1` plus projects `p1` and `p2`.
pub async fn seed_organization(pool: &PgPool) {
    DepartmentRepo::create(pool, "d-1", "Engineering", None)
        .await
        .expect("department insert should succeed");
    for id in ["p1", "p2"] {
        let now = Utc::now();
        let project = Project {
            id: ProjectId::new(id),
            name: format!("Project {id}"),
            description: None,
            department_id: DepartmentId::new("d-1"),
            status: ProjectStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        ProjectRepo::create(pool, &project)
            .await
            .expect("project insert should succeed");
    }
}

/// Insert an active user in department `d-1` whose password is [`PASSWORD`].
pub async fn seed_user(pool: &PgPool, id: &str, role: Role, manager: Option<&str>) -> User {
    let now = Utc::now();
    let user = User {
        id: UserId::new(id),
        email: format!("{id}@example.com"),
        name: id.to_uppercase(),
        role,
        department_id: DepartmentId::new("d-1"),
        manager_id: manager.map(UserId::new),
        is_active: true,
        external_chat_id: None,
        created_at: now,
        updated_at: now,
    };
    let hash = hash_password(PASSWORD).expect("hashing should succeed");
    AccountStore::create(&PgStore::new(pool.clone()), &user, &hash)
        .await
        .expect("user insert should succeed")
}

/// An access token for `user`, signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(&user.id, &user.email, user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

/// Assert the status and the error `type` of a failed response.
pub async fn assert_error(response: Response, status: StatusCode, error_type: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["error"]["type"], error_type, "unexpected body: {json}");
}
