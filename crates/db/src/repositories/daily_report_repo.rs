//! Repository for the `daily_reports` and `tasks` tables.
//!
//! Report rows and task rows are read separately; callers assemble them with
//! [`crate::models::daily_report::assemble`]. Writes that touch tasks run in
//! a single transaction so a report is never visible with a partial task list.

use reportflow_core::report::{DailyReport, ReportStatus};
use reportflow_core::search::DailyReportSearchCriteria;
use reportflow_core::types::CalendarDay;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::daily_report::{DailyReportRow, TaskRow};

const COLUMNS: &str = "id, user_id, report_date, challenges, next_day_plan, status, \
                       submitted_at, approved_at, approved_by, rejected_at, rejected_by, \
                       feedback, created_at, updated_at";

const TASK_COLUMNS: &str =
    "id, daily_report_id, position, project_id, description, hours_spent, progress";

/// Provides persistence for daily reports and their tasks.
pub struct DailyReportRepo;

impl DailyReportRepo {
    /* ---- Writes ---- */

    /// Insert a report and its tasks.
    ///
    /// A second report for the same `(user_id, report_date)` fails with the
    /// `uq_daily_reports_user_date` unique violation.
    pub async fn create(
        pool: &PgPool,
        report: &DailyReport,
    ) -> Result<DailyReportRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO daily_reports
                (id, user_id, report_date, challenges, next_day_plan, status,
                 submitted_at, approved_at, approved_by, rejected_at, rejected_by,
                 feedback, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DailyReportRow>(&query)
            .bind(report.id.as_str())
            .bind(report.user_id.as_str())
            .bind(report.date)
            .bind(&report.challenges)
            .bind(&report.next_day_plan)
            .bind(report.status.as_str())
            .bind(report.submitted_at)
            .bind(report.approved_at)
            .bind(report.approved_by.as_ref().map(|u| u.as_str()))
            .bind(report.rejected_at)
            .bind(report.rejected_by.as_ref().map(|u| u.as_str()))
            .bind(&report.feedback)
            .bind(report.created_at)
            .bind(report.updated_at)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_tasks(&mut tx, report).await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Overwrite a report and replace its task list, provided the stored
    /// status still equals `expected_status`.
    ///
    /// Returns `None` when no row matched: either the report is gone or its
    /// status moved on. Nothing is written in that case.
    pub async fn update(
        pool: &PgPool,
        report: &DailyReport,
        expected_status: ReportStatus,
    ) -> Result<Option<DailyReportRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE daily_reports SET
                challenges = $3,
                next_day_plan = $4,
                status = $5,
                submitted_at = $6,
                approved_at = $7,
                approved_by = $8,
                rejected_at = $9,
                rejected_by = $10,
                feedback = $11,
                updated_at = $12
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DailyReportRow>(&query)
            .bind(report.id.as_str())
            .bind(expected_status.as_str())
            .bind(&report.challenges)
            .bind(&report.next_day_plan)
            .bind(report.status.as_str())
            .bind(report.submitted_at)
            .bind(report.approved_at)
            .bind(report.approved_by.as_ref().map(|u| u.as_str()))
            .bind(report.rejected_at)
            .bind(report.rejected_by.as_ref().map(|u| u.as_str()))
            .bind(&report.feedback)
            .bind(report.updated_at)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM tasks WHERE daily_report_id = $1")
            .bind(report.id.as_str())
            .execute(&mut *tx)
            .await?;
        Self::insert_tasks(&mut tx, report).await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    async fn insert_tasks(
        tx: &mut Transaction<'_, Postgres>,
        report: &DailyReport,
    ) -> Result<(), sqlx::Error> {
        for (position, task) in report.tasks.iter().enumerate() {
            sqlx::query(
                "INSERT INTO tasks
                    (id, daily_report_id, position, project_id, description, hours_spent, progress)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(task.id.as_str())
            .bind(report.id.as_str())
            .bind(position as i32)
            .bind(task.project_id.as_str())
            .bind(&task.description)
            .bind(task.hours_spent)
            .bind(task.progress)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /* ---- Reads ---- */

    pub async fn find_by_id(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<DailyReportRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM daily_reports WHERE id = $1");
        sqlx::query_as::<_, DailyReportRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_user_and_date(
        pool: &PgPool,
        user_id: &str,
        date: CalendarDay,
    ) -> Result<Option<DailyReportRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM daily_reports WHERE user_id = $1 AND report_date = $2");
        sqlx::query_as::<_, DailyReportRow>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM daily_reports WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Reports matching every supplied criterion, newest date first.
    pub async fn search(
        pool: &PgPool,
        criteria: &DailyReportSearchCriteria,
    ) -> Result<Vec<DailyReportRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_reports dr
             WHERE ($1::TEXT IS NULL OR dr.user_id = $1)
               AND ($2::TEXT[] IS NULL OR dr.user_id = ANY($2))
               AND ($3::DATE IS NULL OR dr.report_date >= $3)
               AND ($4::DATE IS NULL OR dr.report_date <= $4)
               AND ($5::TEXT IS NULL OR dr.status = $5)
               AND ($6::TEXT IS NULL OR dr.approved_by = $6)
               AND ($7::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM tasks t
                    WHERE t.daily_report_id = dr.id AND t.project_id = $7))
             ORDER BY dr.report_date DESC, dr.created_at DESC"
        );
        let user_ids: Option<Vec<String>> = criteria
            .user_ids
            .as_ref()
            .map(|ids| ids.iter().map(|id| id.as_str().to_string()).collect());

        sqlx::query_as::<_, DailyReportRow>(&query)
            .bind(criteria.user_id.as_ref().map(|u| u.as_str()))
            .bind(user_ids)
            .bind(criteria.date_from)
            .bind(criteria.date_to)
            .bind(criteria.status.map(|s| s.as_str()))
            .bind(criteria.approver_id.as_ref().map(|u| u.as_str()))
            .bind(criteria.project_id.as_ref().map(|p| p.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Reports of `user_id` dated within `[date_from, date_to]`, oldest first.
    pub async fn list_for_user_in_range(
        pool: &PgPool,
        user_id: &str,
        date_from: CalendarDay,
        date_to: CalendarDay,
    ) -> Result<Vec<DailyReportRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_reports
             WHERE user_id = $1 AND report_date BETWEEN $2 AND $3
             ORDER BY report_date"
        );
        sqlx::query_as::<_, DailyReportRow>(&query)
            .bind(user_id)
            .bind(date_from)
            .bind(date_to)
            .fetch_all(pool)
            .await
    }

    /// Tasks of every report in `report_ids`, ordered by report then position.
    pub async fn tasks_for(
        pool: &PgPool,
        report_ids: &[String],
    ) -> Result<Vec<TaskRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE daily_report_id = ANY($1)
             ORDER BY daily_report_id, position"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(report_ids)
            .fetch_all(pool)
            .await
    }
}
