//! In-memory collaborator implementations for workflow tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::comment::Comment;
use crate::project::Project;
use crate::report::{DailyReport, ReportStatus};
use crate::search::DailyReportSearchCriteria;
use crate::store::{
    AccountStore, CommentStore, PasswordHasher, ProjectStore, ReportStore, StoreError,
    StoreResult, UserStore,
};
use crate::types::{CalendarDay, CommentId, DailyReportId, ProjectId, UserId};
use crate::user::{User, UserCredentials, UserSearchCriteria};

#[derive(Default)]
pub struct MemoryStore {
    reports: Mutex<Vec<DailyReport>>,
    users: Mutex<HashMap<UserId, UserCredentials>>,
    projects: Mutex<HashMap<ProjectId, Project>>,
    comments: Mutex<Vec<Comment>>,
    /// When set, every report call fails with a backend error.
    pub fail_reports: std::sync::atomic::AtomicBool,
    /// When set, the per-day lookup misses, as if the other writer committed
    /// after the workflow checked.
    pub miss_day_lookup: std::sync::atomic::AtomicBool,
    /// Applied to the stored report right after the next `find_by_id` hands
    /// out its copy, as if another writer moved it in between.
    pub status_after_read: Mutex<Option<ReportStatus>>,
}

impl MemoryStore {
    pub fn add_user(&self, user: User, password_hash: &str) {
        self.users.lock().unwrap().insert(
            user.id.clone(),
            UserCredentials {
                user,
                password_hash: password_hash.to_string(),
            },
        );
    }

    pub fn add_project(&self, project: Project) {
        self.projects
            .lock()
            .unwrap()
            .insert(project.id.clone(), project);
    }

    pub fn reports(&self) -> Vec<DailyReport> {
        self.reports.lock().unwrap().clone()
    }

    fn check_backend(&self) -> StoreResult<()> {
        if self.fail_reports.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StoreError::Backend("connection refused".to_string()));
        }
        Ok(())
    }
}

fn matches(report: &DailyReport, c: &DailyReportSearchCriteria) -> bool {
    c.user_id.as_ref().map_or(true, |u| report.user_id == *u)
        && c.user_ids.as_ref().map_or(true, |ids| ids.contains(&report.user_id))
        && c.date_from.map_or(true, |d| report.date >= d)
        && c.date_to.map_or(true, |d| report.date <= d)
        && c.status.map_or(true, |s| report.status == s)
        && c
            .approver_id
            .as_ref()
            .map_or(true, |a| report.approved_by.as_ref() == Some(a))
        && c
            .project_id
            .as_ref()
            .map_or(true, |p| report.tasks.iter().any(|t| t.project_id == *p))
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn find_by_id(&self, id: &DailyReportId) -> StoreResult<Option<DailyReport>> {
        self.check_backend()?;
        let mut reports = self.reports.lock().unwrap();
        let Some(slot) = reports.iter_mut().find(|r| r.id == *id) else {
            return Ok(None);
        };
        let read = slot.clone();
        if let Some(status) = self.status_after_read.lock().unwrap().take() {
            slot.status = status;
        }
        Ok(Some(read))
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        date: CalendarDay,
    ) -> StoreResult<Option<DailyReport>> {
        self.check_backend()?;
        if self.miss_day_lookup.load(std::sync::atomic::Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == *user_id && r.date == date)
            .cloned())
    }

    async fn create(&self, report: &DailyReport) -> StoreResult<DailyReport> {
        self.check_backend()?;
        let mut reports = self.reports.lock().unwrap();
        if reports
            .iter()
            .any(|r| r.user_id == report.user_id && r.date == report.date)
        {
            return Err(StoreError::UniqueViolation(
                "uq_daily_reports_user_date".to_string(),
            ));
        }
        reports.push(report.clone());
        Ok(report.clone())
    }

    async fn update(
        &self,
        report: &DailyReport,
        expected_status: ReportStatus,
    ) -> StoreResult<DailyReport> {
        self.check_backend()?;
        let mut reports = self.reports.lock().unwrap();
        let slot = reports
            .iter_mut()
            .find(|r| r.id == report.id)
            .ok_or_else(|| StoreError::Missing(report.id.to_string()))?;
        if slot.status != expected_status {
            return Err(StoreError::Conflict(format!(
                "report {} is no longer {expected_status}",
                report.id
            )));
        }
        *slot = report.clone();
        Ok(report.clone())
    }

    async fn search(&self, criteria: &DailyReportSearchCriteria) -> StoreResult<Vec<DailyReport>> {
        self.check_backend()?;
        let mut found: Vec<DailyReport> = self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| matches(r, criteria))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(found)
    }

    async fn list_for_user_in_range(
        &self,
        user_id: &UserId,
        date_from: CalendarDay,
        date_to: CalendarDay,
    ) -> StoreResult<Vec<DailyReport>> {
        self.check_backend()?;
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == *user_id && r.date >= date_from && r.date <= date_to)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(id).map(|c| c.user.clone()))
    }

    async fn find_subordinates(&self, manager_id: &UserId) -> StoreResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.user.manager_id.as_ref() == Some(manager_id))
            .map(|c| c.user.clone())
            .collect())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|c| c.user.email == email)
            .map(|c| c.user.clone()))
    }

    async fn find_credentials_by_id(&self, id: &UserId) -> StoreResult<Option<UserCredentials>> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> StoreResult<Option<UserCredentials>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|c| c.user.email == email)
            .cloned())
    }

    async fn create(&self, user: &User, password_hash: &str) -> StoreResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|c| c.user.email == user.email) {
            return Err(StoreError::UniqueViolation("uq_users_email".to_string()));
        }
        users.insert(
            user.id.clone(),
            UserCredentials {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> StoreResult<User> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .get_mut(&user.id)
            .ok_or_else(|| StoreError::Missing(user.id.to_string()))?;
        slot.user = user.clone();
        Ok(user.clone())
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> StoreResult<()> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .get_mut(id)
            .ok_or_else(|| StoreError::Missing(id.to_string()))?;
        slot.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn search(&self, criteria: &UserSearchCriteria) -> StoreResult<Vec<User>> {
        let mut found: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .values()
            .map(|c| c.user.clone())
            .filter(|u| criteria.role.map_or(true, |r| u.role == r))
            .filter(|u| criteria.is_active.map_or(true, |a| u.is_active == a))
            .filter(|u| {
                criteria
                    .email
                    .as_ref()
                    .map_or(true, |e| u.email.contains(e.as_str()))
            })
            .collect();
        found.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(found)
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn find_by_id(&self, id: &ProjectId) -> StoreResult<Option<Project>> {
        Ok(self.projects.lock().unwrap().get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ProjectId]) -> StoreResult<Vec<Project>> {
        let projects = self.projects.lock().unwrap();
        Ok(ids.iter().filter_map(|id| projects.get(id).cloned()).collect())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn find_by_id(&self, id: &CommentId) -> StoreResult<Option<Comment>> {
        Ok(self.comments.lock().unwrap().iter().find(|c| c.id == *id).cloned())
    }

    async fn find_by_daily_report_id(
        &self,
        daily_report_id: &DailyReportId,
    ) -> StoreResult<Vec<Comment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.daily_report_id == *daily_report_id)
            .cloned()
            .collect())
    }

    async fn create(&self, comment: &Comment) -> StoreResult<Comment> {
        self.comments.lock().unwrap().push(comment.clone());
        Ok(comment.clone())
    }

    async fn mark_as_read(&self, id: &CommentId) -> StoreResult<Comment> {
        let mut comments = self.comments.lock().unwrap();
        let slot = comments
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| StoreError::Missing(id.to_string()))?;
        slot.is_read = true;
        Ok(slot.clone())
    }
}

/// Reversible "hash" so tests can reason about stored values.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> StoreResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> StoreResult<bool> {
        Ok(hash == format!("hashed:{password}"))
    }
}
