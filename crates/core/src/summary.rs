//! Per-period aggregation over a user's reports.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::report::{DailyReport, ReportStatus};
use crate::types::{CalendarDay, ProjectId, UserId};

/// Derived totals for one user over an inclusive date range. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReportSummary {
    pub user_id: UserId,
    pub date_from: CalendarDay,
    pub date_to: CalendarDay,
    pub total_reports: usize,
    pub total_hours: f64,
    pub project_hours: BTreeMap<ProjectId, f64>,
    pub submitted_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
    pub draft_count: usize,
}

impl DailyReportSummary {
    pub fn empty(user_id: UserId, date_from: CalendarDay, date_to: CalendarDay) -> Self {
        Self {
            user_id,
            date_from,
            date_to,
            total_reports: 0,
            total_hours: 0.0,
            project_hours: BTreeMap::new(),
            submitted_count: 0,
            approved_count: 0,
            rejected_count: 0,
            draft_count: 0,
        }
    }

    fn add(mut self, report: &DailyReport) -> Self {
        self.total_reports += 1;
        match report.status {
            ReportStatus::Draft => self.draft_count += 1,
            ReportStatus::Submitted => self.submitted_count += 1,
            ReportStatus::Approved => self.approved_count += 1,
            ReportStatus::Rejected => self.rejected_count += 1,
        }
        for task in &report.tasks {
            self.total_hours += task.hours_spent;
            *self
                .project_hours
                .entry(task.project_id.clone())
                .or_insert(0.0) += task.hours_spent;
        }
        self
    }
}

/// Fold the reports owned by `user_id` dated within `[date_from, date_to]`.
///
/// Reports outside the owner or range are ignored.
pub fn summarize<'a>(
    user_id: &UserId,
    date_from: CalendarDay,
    date_to: CalendarDay,
    reports: impl IntoIterator<Item = &'a DailyReport>,
) -> DailyReportSummary {
    reports
        .into_iter()
        .filter(|r| r.user_id == *user_id && r.date >= date_from && r.date <= date_to)
        .fold(
            DailyReportSummary::empty(user_id.clone(), date_from, date_to),
            DailyReportSummary::add,
        )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::report::tests::sample_report;
    use crate::report::TaskProgress;
    use crate::types::{DailyReportId, TaskId};

    fn day(d: u32) -> CalendarDay {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn report(id: &str, date: u32, status: ReportStatus, tasks: &[(&str, f64)]) -> DailyReport {
        let mut r = sample_report("u1", status);
        r.id = DailyReportId::new(id);
        r.date = day(date);
        r.tasks = tasks
            .iter()
            .enumerate()
            .map(|(i, (project, hours))| TaskProgress {
                id: TaskId::new(format!("{id}-t{i}")),
                project_id: ProjectId::new(*project),
                description: "work".to_string(),
                hours_spent: *hours,
                progress: 50,
            })
            .collect();
        r
    }

    #[test]
    fn test_empty_range() {
        let summary = summarize(&UserId::new("u1"), day(1), day(31), &[]);
        assert_eq!(summary, DailyReportSummary::empty(UserId::new("u1"), day(1), day(31)));
    }

    #[test]
    fn test_totals_and_status_counts() {
        let reports = vec![
            report("r1", 10, ReportStatus::Approved, &[("p1", 4.0), ("p2", 3.0)]),
            report("r2", 11, ReportStatus::Submitted, &[("p1", 6.5)]),
            report("r3", 12, ReportStatus::Rejected, &[("p2", 2.0)]),
            report("r4", 13, ReportStatus::Draft, &[("p3", 1.0)]),
        ];
        let summary = summarize(&UserId::new("u1"), day(1), day(31), &reports);

        assert_eq!(summary.total_reports, 4);
        assert_eq!(summary.total_hours, 16.5);
        assert_eq!(summary.project_hours[&ProjectId::new("p1")], 10.5);
        assert_eq!(summary.project_hours[&ProjectId::new("p2")], 5.0);
        assert_eq!(summary.project_hours[&ProjectId::new("p3")], 1.0);
        assert_eq!(summary.approved_count, 1);
        assert_eq!(summary.submitted_count, 1);
        assert_eq!(summary.rejected_count, 1);
        assert_eq!(summary.draft_count, 1);
    }

    #[test]
    fn test_range_is_inclusive_and_filters_outside() {
        let reports = vec![
            report("r1", 9, ReportStatus::Draft, &[("p1", 1.0)]),
            report("r2", 10, ReportStatus::Draft, &[("p1", 2.0)]),
            report("r3", 20, ReportStatus::Draft, &[("p1", 4.0)]),
            report("r4", 21, ReportStatus::Draft, &[("p1", 8.0)]),
        ];
        let summary = summarize(&UserId::new("u1"), day(10), day(20), &reports);
        assert_eq!(summary.total_reports, 2);
        assert_eq!(summary.total_hours, 6.0);
    }

    #[test]
    fn test_other_users_reports_ignored() {
        let mut foreign = report("r1", 10, ReportStatus::Draft, &[("p1", 5.0)]);
        foreign.user_id = UserId::new("u2");
        let summary = summarize(&UserId::new("u1"), day(1), day(31), &[foreign]);
        assert_eq!(summary.total_reports, 0);
    }
}
