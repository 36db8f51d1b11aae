//! Role-based authorization predicates for report transitions.
//!
//! Report-state predicates (can edit / submit / approve / reject) live in
//! [`crate::report`]; this module answers who may act on whose reports.

use crate::config::ManagerScope;
use crate::report::DailyReport;
use crate::roles::Role;
use crate::types::UserId;
use crate::user::User;

/// Whose reports a user may approve, reject, or search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportReach {
    /// Every report in the organization.
    All,
    /// The user's own reports plus those of users whose `manager_id` is this user.
    DirectReportsOf(UserId),
    /// Only the user's own reports.
    OwnOnly(UserId),
}

pub fn report_reach(user: &User, scope: ManagerScope) -> ReportReach {
    match user.role {
        Role::Admin => ReportReach::All,
        Role::Manager => match scope {
            ManagerScope::Unrestricted => ReportReach::All,
            ManagerScope::DirectReports => ReportReach::DirectReportsOf(user.id.clone()),
        },
        Role::Employee => ReportReach::OwnOnly(user.id.clone()),
    }
}

/// Whether `approver` may approve or reject a report owned by `owner`.
///
/// Employees never approve, not even their own reports.
pub fn can_approve_reports_of(approver: &User, owner: &User, scope: ManagerScope) -> bool {
    match report_reach(approver, scope) {
        ReportReach::All => true,
        ReportReach::DirectReportsOf(manager_id) => owner.manager_id.as_ref() == Some(&manager_id),
        ReportReach::OwnOnly(_) => false,
    }
}

/// The report owner, or anyone with report-management capability, may comment.
pub fn can_comment_on_report(report: &DailyReport, author: &User) -> bool {
    report.user_id == author.id || author.role.can_manage_daily_reports()
}

/// The owner, or anyone with report-management capability, may read a report
/// and its comments.
pub fn can_view_report(report: &DailyReport, viewer_id: &UserId, viewer_role: Role) -> bool {
    report.user_id == *viewer_id || viewer_role.can_manage_daily_reports()
}

/// A user may read their own summary; managers and admins may read anyone's.
pub fn can_view_summary(requester: &User, target_id: &UserId) -> bool {
    requester.id == *target_id || requester.role.can_manage_daily_reports()
}
