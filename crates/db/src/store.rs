//! Collaborator trait implementations backed by PostgreSQL.

use async_trait::async_trait;
use reportflow_core::comment::Comment;
use reportflow_core::project::Project;
use reportflow_core::report::{DailyReport, ReportStatus};
use reportflow_core::search::DailyReportSearchCriteria;
use reportflow_core::store::{
    AccountStore, CommentStore, ProjectStore, ReportStore, StoreError, StoreResult, UserStore,
};
use reportflow_core::types::{CalendarDay, CommentId, DailyReportId, ProjectId, UserId};
use reportflow_core::user::{User, UserCredentials, UserSearchCriteria};

use crate::error::store_error;
use crate::models::daily_report::{assemble, DailyReportRow};
use crate::models::user::{into_users, UserRow};
use crate::repositories::{CommentRepo, DailyReportRepo, ProjectRepo, UserRepo};
use crate::DbPool;

/// One pool serves every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Load the tasks for `rows` and build full reports.
    async fn with_tasks(&self, rows: Vec<DailyReportRow>) -> StoreResult<Vec<DailyReport>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let tasks = DailyReportRepo::tasks_for(&self.pool, &ids)
            .await
            .map_err(store_error)?;
        assemble(rows, tasks)
    }

    async fn with_tasks_one(&self, row: DailyReportRow) -> StoreResult<DailyReport> {
        self.with_tasks(vec![row])
            .await?
            .pop()
            .ok_or_else(|| StoreError::Backend("report row vanished during load".to_string()))
    }
}

#[async_trait]
impl ReportStore for PgStore {
    async fn find_by_id(&self, id: &DailyReportId) -> StoreResult<Option<DailyReport>> {
        match DailyReportRepo::find_by_id(&self.pool, id.as_str())
            .await
            .map_err(store_error)?
        {
            Some(row) => self.with_tasks_one(row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        date: CalendarDay,
    ) -> StoreResult<Option<DailyReport>> {
        match DailyReportRepo::find_by_user_and_date(&self.pool, user_id.as_str(), date)
            .await
            .map_err(store_error)?
        {
            Some(row) => self.with_tasks_one(row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn create(&self, report: &DailyReport) -> StoreResult<DailyReport> {
        let row = DailyReportRepo::create(&self.pool, report)
            .await
            .map_err(store_error)?;
        self.with_tasks_one(row).await
    }

    async fn update(
        &self,
        report: &DailyReport,
        expected_status: ReportStatus,
    ) -> StoreResult<DailyReport> {
        let updated = DailyReportRepo::update(&self.pool, report, expected_status)
            .await
            .map_err(store_error)?;

        match updated {
            Some(row) => self.with_tasks_one(row).await,
            None => {
                let exists = DailyReportRepo::exists(&self.pool, report.id.as_str())
                    .await
                    .map_err(store_error)?;
                if exists {
                    tracing::warn!(report_id = %report.id, "Report status changed concurrently");
                    Err(StoreError::Conflict(format!(
                        "Daily report {} is no longer {expected_status}",
                        report.id
                    )))
                } else {
                    Err(StoreError::Missing(format!(
                        "Daily report {} not found",
                        report.id
                    )))
                }
            }
        }
    }

    async fn search(&self, criteria: &DailyReportSearchCriteria) -> StoreResult<Vec<DailyReport>> {
        let rows = DailyReportRepo::search(&self.pool, criteria)
            .await
            .map_err(store_error)?;
        self.with_tasks(rows).await
    }

    async fn list_for_user_in_range(
        &self,
        user_id: &UserId,
        date_from: CalendarDay,
        date_to: CalendarDay,
    ) -> StoreResult<Vec<DailyReport>> {
        let rows = DailyReportRepo::list_for_user_in_range(
            &self.pool,
            user_id.as_str(),
            date_from,
            date_to,
        )
        .await
        .map_err(store_error)?;
        self.with_tasks(rows).await
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        UserRepo::find_by_id(&self.pool, id.as_str())
            .await
            .map_err(store_error)?
            .map(UserRow::into_user)
            .transpose()
    }

    async fn find_subordinates(&self, manager_id: &UserId) -> StoreResult<Vec<User>> {
        let rows = UserRepo::find_by_manager(&self.pool, manager_id.as_str())
            .await
            .map_err(store_error)?;
        into_users(rows)
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        UserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(store_error)?
            .map(UserRow::into_user)
            .transpose()
    }

    async fn find_credentials_by_id(&self, id: &UserId) -> StoreResult<Option<UserCredentials>> {
        UserRepo::find_by_id(&self.pool, id.as_str())
            .await
            .map_err(store_error)?
            .map(UserRow::into_credentials)
            .transpose()
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> StoreResult<Option<UserCredentials>> {
        UserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(store_error)?
            .map(UserRow::into_credentials)
            .transpose()
    }

    async fn create(&self, user: &User, password_hash: &str) -> StoreResult<User> {
        UserRepo::create(&self.pool, user, password_hash)
            .await
            .map_err(store_error)?
            .into_user()
    }

    async fn update(&self, user: &User) -> StoreResult<User> {
        UserRepo::update(&self.pool, user)
            .await
            .map_err(store_error)?
            .ok_or_else(|| StoreError::Missing(format!("User {} not found", user.id)))?
            .into_user()
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> StoreResult<()> {
        let updated = UserRepo::update_password(&self.pool, id.as_str(), password_hash)
            .await
            .map_err(store_error)?;
        if !updated {
            return Err(StoreError::Missing(format!("User {id} not found")));
        }
        Ok(())
    }

    async fn search(&self, criteria: &UserSearchCriteria) -> StoreResult<Vec<User>> {
        let rows = UserRepo::search(&self.pool, criteria)
            .await
            .map_err(store_error)?;
        into_users(rows)
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn find_by_id(&self, id: &ProjectId) -> StoreResult<Option<Project>> {
        ProjectRepo::find_by_id(&self.pool, id.as_str())
            .await
            .map_err(store_error)?
            .map(|row| row.into_project())
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[ProjectId]) -> StoreResult<Vec<Project>> {
        let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
        ProjectRepo::find_by_ids(&self.pool, &ids)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(|row| row.into_project())
            .collect()
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn find_by_id(&self, id: &CommentId) -> StoreResult<Option<Comment>> {
        Ok(CommentRepo::find_by_id(&self.pool, id.as_str())
            .await
            .map_err(store_error)?
            .map(Comment::from))
    }

    async fn find_by_daily_report_id(
        &self,
        daily_report_id: &DailyReportId,
    ) -> StoreResult<Vec<Comment>> {
        let rows = CommentRepo::list_by_report(&self.pool, daily_report_id.as_str())
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn create(&self, comment: &Comment) -> StoreResult<Comment> {
        CommentRepo::create(&self.pool, comment)
            .await
            .map(Comment::from)
            .map_err(store_error)
    }

    async fn mark_as_read(&self, id: &CommentId) -> StoreResult<Comment> {
        CommentRepo::mark_as_read(&self.pool, id.as_str())
            .await
            .map_err(store_error)?
            .map(Comment::from)
            .ok_or_else(|| StoreError::Missing(format!("Comment {id} not found")))
    }
}
