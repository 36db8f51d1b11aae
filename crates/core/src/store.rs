//! Collaborator contracts consumed by the workflows.
//!
//! Implementations live outside this crate (PostgreSQL in `reportflow-db`,
//! Argon2 hashing in `reportflow-api`). The engine issues check-then-write
//! sequences and relies on the store to reject a concurrent duplicate
//! (`UniqueViolation`) or a concurrent status change (`Conflict`).

use async_trait::async_trait;

use crate::comment::Comment;
use crate::error::CoreError;
use crate::project::Project;
use crate::report::{DailyReport, ReportStatus};
use crate::search::DailyReportSearchCriteria;
use crate::types::{CalendarDay, CommentId, DailyReportId, ProjectId, UserId};
use crate::user::{User, UserCredentials, UserSearchCriteria};

/// Failure reported by a collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The row changed between read and write.
    #[error("Concurrent modification: {0}")]
    Conflict(String),

    /// The row to update or mark no longer exists.
    #[error("Row not found: {0}")]
    Missing(String),

    /// Any other backend failure (connection, timeout, driver error).
    #[error("Backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(msg) => CoreError::AlreadyExists(msg),
            StoreError::Conflict(msg) => CoreError::BusinessRule(msg),
            StoreError::Missing(msg) => CoreError::NotFound(msg),
            StoreError::Backend(msg) => CoreError::ExternalService(msg),
        }
    }
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn find_by_id(&self, id: &DailyReportId) -> StoreResult<Option<DailyReport>>;

    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        date: CalendarDay,
    ) -> StoreResult<Option<DailyReport>>;

    /// Insert a new report with its tasks. Fails with `UniqueViolation` when
    /// `(user_id, date)` is taken.
    async fn create(&self, report: &DailyReport) -> StoreResult<DailyReport>;

    /// Replace the whole report, including an atomic task-list swap.
    ///
    /// The write applies only while the stored status still equals
    /// `expected_status`; otherwise it fails with `Conflict`.
    async fn update(
        &self,
        report: &DailyReport,
        expected_status: ReportStatus,
    ) -> StoreResult<DailyReport>;

    /// Matching reports ordered by date descending.
    async fn search(&self, criteria: &DailyReportSearchCriteria) -> StoreResult<Vec<DailyReport>>;

    /// All reports of `user_id` dated within `[date_from, date_to]`.
    async fn list_for_user_in_range(
        &self,
        user_id: &UserId,
        date_from: CalendarDay,
        date_to: CalendarDay,
    ) -> StoreResult<Vec<DailyReport>>;
}

/// Read-only user lookups needed by the report engine.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>>;

    /// Users whose `manager_id` is `manager_id`.
    async fn find_subordinates(&self, manager_id: &UserId) -> StoreResult<Vec<User>>;
}

/// Full account persistence used by the user account workflow.
#[async_trait]
pub trait AccountStore: UserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_credentials_by_id(&self, id: &UserId) -> StoreResult<Option<UserCredentials>>;

    async fn find_credentials_by_email(&self, email: &str)
        -> StoreResult<Option<UserCredentials>>;

    async fn create(&self, user: &User, password_hash: &str) -> StoreResult<User>;

    async fn update(&self, user: &User) -> StoreResult<User>;

    async fn update_password(&self, id: &UserId, password_hash: &str) -> StoreResult<()>;

    async fn search(&self, criteria: &UserSearchCriteria) -> StoreResult<Vec<User>>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn find_by_id(&self, id: &ProjectId) -> StoreResult<Option<Project>>;

    /// Projects among `ids` that exist. Missing ids are simply absent.
    async fn find_by_ids(&self, ids: &[ProjectId]) -> StoreResult<Vec<Project>>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn find_by_id(&self, id: &CommentId) -> StoreResult<Option<Comment>>;

    /// Comments of a report, oldest first.
    async fn find_by_daily_report_id(
        &self,
        daily_report_id: &DailyReportId,
    ) -> StoreResult<Vec<Comment>>;

    async fn create(&self, comment: &Comment) -> StoreResult<Comment>;

    /// Set `is_read = true`. Idempotent.
    async fn mark_as_read(&self, id: &CommentId) -> StoreResult<Comment>;
}

/// Password hashing is delegated; the engine never sees key material.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> StoreResult<String>;

    fn verify(&self, password: &str, hash: &str) -> StoreResult<bool>;
}
