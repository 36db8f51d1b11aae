use std::sync::Arc;

use reportflow_core::{DailyReportWorkflow, UserWorkflow};
use reportflow_db::PgStore;

use crate::auth::password::Argon2Hasher;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the workflows hold their collaborators behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: reportflow_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub reports: DailyReportWorkflow,
    pub users: UserWorkflow,
}

impl AppState {
    /// Wire both workflows to a single PostgreSQL-backed store.
    pub fn new(pool: reportflow_db::DbPool, config: ServerConfig) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));

        let reports = DailyReportWorkflow::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            config.workflow,
        );
        let users = UserWorkflow::new(store, Arc::new(Argon2Hasher));

        Self {
            pool,
            config: Arc::new(config),
            reports,
            users,
        }
    }
}
