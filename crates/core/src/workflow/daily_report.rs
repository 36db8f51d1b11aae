//! Daily report lifecycle, comments, search, and summary workflows.
//!
//! Each operation is a linear sequence of awaited collaborator calls: lookups
//! and guards first, then at most one write. Expected business failures are
//! returned as [`CoreError`] values.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::authorization::{
    can_approve_reports_of, can_comment_on_report, can_view_summary, report_reach, ReportReach,
};
use crate::comment::{validate_comment_content, Comment, CreateCommentInput};
use crate::config::WorkflowConfig;
use crate::error::{CoreError, CoreResult};
use crate::report::{
    can_approve_daily_report, can_edit_daily_report, can_reject_daily_report,
    can_submit_daily_report, ApproveDailyReportInput, CreateDailyReportInput, DailyReport,
    RejectDailyReportInput, ReportStatus, SubmitDailyReportInput, TaskInput, TaskProgress,
    UpdateDailyReportInput,
};
use crate::search::{scope_criteria, DailyReportSearchCriteria};
use crate::store::{CommentStore, ProjectStore, ReportStore, StoreError, UserStore};
use crate::summary::{summarize, DailyReportSummary};
use crate::types::{CalendarDay, CommentId, DailyReportId, ProjectId, UserId};
use crate::user::User;
use crate::validation::{is_blank, validate_required_text, validate_tasks};

/// The report workflow engine. Cheap to clone; all state lives in the stores.
#[derive(Clone)]
pub struct DailyReportWorkflow {
    reports: Arc<dyn ReportStore>,
    users: Arc<dyn UserStore>,
    projects: Arc<dyn ProjectStore>,
    comments: Arc<dyn CommentStore>,
    config: WorkflowConfig,
}

impl DailyReportWorkflow {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        users: Arc<dyn UserStore>,
        projects: Arc<dyn ProjectStore>,
        comments: Arc<dyn CommentStore>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            reports,
            users,
            projects,
            comments,
            config,
        }
    }

    /* ----------------------------------------------------------------------
    Lifecycle
    ---------------------------------------------------------------------- */

    /// Create a new `draft` report for `(user_id, date)`.
    pub async fn create(&self, input: CreateDailyReportInput) -> CoreResult<DailyReport> {
        self.validate_task_list(&input.tasks).await?;
        validate_required_text(&input.challenges, "challenges", "Challenges")?;
        validate_required_text(&input.next_day_plan, "next_day_plan", "Next day plan")?;

        self.require_user(&input.user_id, "User").await?;

        if self
            .reports
            .find_by_user_and_date(&input.user_id, input.date)
            .await?
            .is_some()
        {
            return Err(duplicate_report(input.date));
        }

        let now = Utc::now();
        let report = DailyReport {
            id: DailyReportId::generate(),
            user_id: input.user_id,
            date: input.date,
            tasks: assign_task_ids(input.tasks),
            challenges: input.challenges,
            next_day_plan: input.next_day_plan,
            status: ReportStatus::Draft,
            submitted_at: None,
            approved_at: None,
            approved_by: None,
            rejected_at: None,
            rejected_by: None,
            feedback: None,
            created_at: now,
            updated_at: now,
        };

        // A concurrent writer may have taken the date after our check.
        let created = self.reports.create(&report).await.map_err(|e| match e {
            StoreError::UniqueViolation(_) => duplicate_report(report.date),
            other => other.into(),
        })?;

        tracing::info!(
            report_id = %created.id,
            user_id = %created.user_id,
            date = %created.date,
            task_count = created.tasks.len(),
            "Daily report created"
        );
        Ok(created)
    }

    /// Partially update an editable report. A supplied task list replaces the
    /// old one wholesale and every task receives a new id.
    pub async fn update(&self, input: UpdateDailyReportInput) -> CoreResult<DailyReport> {
        let report = self.require_report(&input.id).await?;

        if !can_edit_daily_report(&report, &input.user_id) {
            tracing::warn!(report_id = %report.id, user_id = %input.user_id, "Edit refused");
            return Err(CoreError::Forbidden(
                "You do not have permission to edit this daily report".to_string(),
            ));
        }

        if let Some(tasks) = &input.tasks {
            self.validate_task_list(tasks).await?;
        }
        if let Some(challenges) = &input.challenges {
            validate_required_text(challenges, "challenges", "Challenges")?;
        }
        if let Some(plan) = &input.next_day_plan {
            validate_required_text(plan, "next_day_plan", "Next day plan")?;
        }

        let expected = report.status;
        let updated = DailyReport {
            tasks: input.tasks.map(assign_task_ids).unwrap_or(report.tasks),
            challenges: input.challenges.unwrap_or(report.challenges),
            next_day_plan: input.next_day_plan.unwrap_or(report.next_day_plan),
            updated_at: Utc::now(),
            ..report
        };

        let saved = self.reports.update(&updated, expected).await?;
        tracing::info!(report_id = %saved.id, user_id = %saved.user_id, "Daily report updated");
        Ok(saved)
    }

    /// Submit a draft or rejected report. Only the owner may submit.
    pub async fn submit(&self, input: SubmitDailyReportInput) -> CoreResult<DailyReport> {
        let report = self.require_report(&input.id).await?;

        if report.user_id != input.user_id {
            return Err(CoreError::Forbidden(
                "You cannot submit another user's daily report".to_string(),
            ));
        }

        if !can_submit_daily_report(&report) {
            tracing::debug!(report_id = %report.id, status = %report.status, "Submit refused");
            return Err(CoreError::BusinessRule(format!(
                "A {} daily report cannot be submitted",
                report.status
            )));
        }

        let expected = report.status;
        let now = Utc::now();
        let submitted = DailyReport {
            status: ReportStatus::Submitted,
            submitted_at: Some(now),
            updated_at: now,
            ..report
        };

        let saved = self.reports.update(&submitted, expected).await?;
        tracing::info!(report_id = %saved.id, user_id = %saved.user_id, "Daily report submitted");
        Ok(saved)
    }

    /// Approve a submitted report. Feedback is overwritten, so an omitted
    /// feedback clears any left over from a previous rejection.
    pub async fn approve(&self, input: ApproveDailyReportInput) -> CoreResult<DailyReport> {
        let report = self.require_report(&input.id).await?;
        let approver = self.require_user(&input.approver_id, "Approver").await?;

        if !self.may_review(&approver, &report).await? {
            return Err(CoreError::Forbidden(
                "You do not have permission to approve this daily report".to_string(),
            ));
        }

        if !can_approve_daily_report(&report) {
            return Err(CoreError::BusinessRule(format!(
                "A {} daily report cannot be approved",
                report.status
            )));
        }

        let now = Utc::now();
        let approved = DailyReport {
            status: ReportStatus::Approved,
            approved_at: Some(now),
            approved_by: Some(approver.id.clone()),
            feedback: input.feedback,
            updated_at: now,
            ..report
        };

        let saved = self
            .reports
            .update(&approved, ReportStatus::Submitted)
            .await?;
        tracing::info!(
            report_id = %saved.id,
            approver_id = %approver.id,
            "Daily report approved"
        );
        Ok(saved)
    }

    /// Send a submitted report back to its owner with mandatory feedback.
    pub async fn reject(&self, input: RejectDailyReportInput) -> CoreResult<DailyReport> {
        let report = self.require_report(&input.id).await?;
        let rejector = self.require_user(&input.rejector_id, "Rejector").await?;

        if !self.may_review(&rejector, &report).await? {
            return Err(CoreError::Forbidden(
                "You do not have permission to reject this daily report".to_string(),
            ));
        }

        if !can_reject_daily_report(&report) {
            return Err(CoreError::BusinessRule(format!(
                "A {} daily report cannot be rejected",
                report.status
            )));
        }

        if is_blank(&input.feedback) {
            return Err(CoreError::validation_field(
                "A reason is required when rejecting a daily report",
                "feedback",
            ));
        }

        let now = Utc::now();
        let rejected = DailyReport {
            status: ReportStatus::Rejected,
            rejected_at: Some(now),
            rejected_by: Some(rejector.id.clone()),
            feedback: Some(input.feedback),
            updated_at: now,
            ..report
        };

        let saved = self
            .reports
            .update(&rejected, ReportStatus::Submitted)
            .await?;
        tracing::info!(
            report_id = %saved.id,
            rejector_id = %rejector.id,
            "Daily report rejected"
        );
        Ok(saved)
    }

    pub async fn get_report(&self, id: &DailyReportId) -> CoreResult<DailyReport> {
        self.require_report(id).await
    }

    /* ----------------------------------------------------------------------
    Comments
    ---------------------------------------------------------------------- */

    pub async fn create_comment(&self, input: CreateCommentInput) -> CoreResult<Comment> {
        let report = self.require_report(&input.daily_report_id).await?;
        let author = self.require_user(&input.user_id, "User").await?;

        if !can_comment_on_report(&report, &author) {
            return Err(CoreError::Forbidden(
                "You do not have permission to comment on this daily report".to_string(),
            ));
        }

        validate_comment_content(&input.content)?;

        let now = Utc::now();
        let comment = Comment {
            id: CommentId::generate(),
            daily_report_id: report.id,
            user_id: author.id,
            content: input.content,
            is_read: false,
            created_at: now,
            updated_at: now,
        };

        let created = self.comments.create(&comment).await?;
        tracing::info!(
            comment_id = %created.id,
            report_id = %created.daily_report_id,
            user_id = %created.user_id,
            "Comment created"
        );
        Ok(created)
    }

    /// Comments of a report, oldest first.
    pub async fn list_comments(&self, daily_report_id: &DailyReportId) -> CoreResult<Vec<Comment>> {
        self.require_report(daily_report_id).await?;
        Ok(self.comments.find_by_daily_report_id(daily_report_id).await?)
    }

    /// Idempotent: an already-read comment is returned unchanged.
    pub async fn mark_comment_read(&self, id: &CommentId) -> CoreResult<Comment> {
        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Comment {id} not found")))?;

        if comment.is_read {
            return Ok(comment);
        }

        let read = self.comments.mark_as_read(id).await?;
        tracing::info!(comment_id = %read.id, "Comment marked as read");
        Ok(read)
    }

    /* ----------------------------------------------------------------------
    Search and summary
    ---------------------------------------------------------------------- */

    /// Search reports within the requester's visibility, newest date first.
    pub async fn search(
        &self,
        requester_id: &UserId,
        criteria: DailyReportSearchCriteria,
    ) -> CoreResult<Vec<DailyReport>> {
        let requester = self.require_user(requester_id, "User").await?;
        let reach = report_reach(&requester, self.config.manager_scope);

        let direct_reports = match &reach {
            ReportReach::DirectReportsOf(manager_id) => self
                .users
                .find_subordinates(manager_id)
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect(),
            ReportReach::All | ReportReach::OwnOnly(_) => Vec::new(),
        };

        match scope_criteria(&reach, criteria, &direct_reports) {
            Some(scoped) => Ok(self.reports.search(&scoped).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Aggregate hours and status counts for `target_id` over `[date_from, date_to]`.
    pub async fn summary(
        &self,
        requester_id: &UserId,
        target_id: &UserId,
        date_from: CalendarDay,
        date_to: CalendarDay,
    ) -> CoreResult<DailyReportSummary> {
        let requester = self.require_user(requester_id, "User").await?;

        if !can_view_summary(&requester, target_id) {
            return Err(CoreError::Forbidden(
                "You do not have permission to view another user's summary".to_string(),
            ));
        }

        self.require_user(target_id, "Target user").await?;

        if date_from > date_to {
            return Err(CoreError::validation_field(
                "date_from must not be after date_to",
                "date_from",
            ));
        }

        let reports = self
            .reports
            .list_for_user_in_range(target_id, date_from, date_to)
            .await?;
        Ok(summarize(target_id, date_from, date_to, &reports))
    }

    /* ----------------------------------------------------------------------
    Helpers
    ---------------------------------------------------------------------- */

    async fn require_report(&self, id: &DailyReportId) -> CoreResult<DailyReport> {
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Daily report {id} not found")))
    }

    async fn require_user(&self, id: &UserId, label: &str) -> CoreResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("{label} {id} not found")))
    }

    /// Whether `reviewer` may approve or reject `report` under the configured scope.
    async fn may_review(&self, reviewer: &User, report: &DailyReport) -> CoreResult<bool> {
        match report_reach(reviewer, self.config.manager_scope) {
            ReportReach::All => Ok(true),
            ReportReach::OwnOnly(_) => Ok(false),
            ReportReach::DirectReportsOf(_) => {
                let owner = self.require_user(&report.user_id, "Report owner").await?;
                Ok(can_approve_reports_of(
                    reviewer,
                    &owner,
                    self.config.manager_scope,
                ))
            }
        }
    }

    /// Pure task checks, then existence of every referenced project.
    async fn validate_task_list(&self, tasks: &[TaskInput]) -> CoreResult<()> {
        validate_tasks(tasks)?;

        let mut ids: Vec<ProjectId> = Vec::with_capacity(tasks.len());
        for task in tasks {
            if !ids.contains(&task.project_id) {
                ids.push(task.project_id.clone());
            }
        }

        let found: HashSet<ProjectId> = self
            .projects
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        match ids.into_iter().find(|id| !found.contains(id)) {
            Some(missing) => Err(CoreError::NotFound(format!("Project {missing} not found"))),
            None => Ok(()),
        }
    }
}

fn assign_task_ids(tasks: Vec<TaskInput>) -> Vec<TaskProgress> {
    tasks.into_iter().map(TaskInput::into_task).collect()
}

fn duplicate_report(date: CalendarDay) -> CoreError {
    CoreError::BusinessRule(format!("A daily report already exists for {date}"))
}
