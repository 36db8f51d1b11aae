//! Report search criteria and role-based visibility scoping.

use serde::{Deserialize, Serialize};

use crate::authorization::ReportReach;
use crate::report::ReportStatus;
use crate::types::{CalendarDay, ProjectId, UserId};

/// Filters accepted by the report store. Every `Some` field narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyReportSearchCriteria {
    pub user_id: Option<UserId>,
    /// Restricts owners to this set. Set by scoping, never by callers.
    #[serde(skip)]
    pub user_ids: Option<Vec<UserId>>,
    pub date_from: Option<CalendarDay>,
    pub date_to: Option<CalendarDay>,
    pub status: Option<ReportStatus>,
    pub approver_id: Option<UserId>,
    /// Matches reports with at least one task on this project.
    pub project_id: Option<ProjectId>,
}

/// Apply the requester's visibility to caller-supplied criteria.
///
/// `direct_reports` lists the ids whose `manager_id` is the requester; it is
/// consulted only for [`ReportReach::DirectReportsOf`]. Returns `None` when
/// the criteria can match nothing the requester is allowed to see.
pub fn scope_criteria(
    reach: &ReportReach,
    mut criteria: DailyReportSearchCriteria,
    direct_reports: &[UserId],
) -> Option<DailyReportSearchCriteria> {
    match reach {
        ReportReach::All => {
            criteria.user_ids = None;
            Some(criteria)
        }
        ReportReach::OwnOnly(own_id) => {
            // Any caller-supplied owner is overwritten.
            criteria.user_id = Some(own_id.clone());
            criteria.user_ids = None;
            Some(criteria)
        }
        ReportReach::DirectReportsOf(manager_id) => {
            let mut visible = Vec::with_capacity(direct_reports.len() + 1);
            visible.push(manager_id.clone());
            visible.extend(direct_reports.iter().cloned());

            match &criteria.user_id {
                Some(requested) if !visible.contains(requested) => None,
                Some(_) => {
                    criteria.user_ids = None;
                    Some(criteria)
                }
                None => {
                    criteria.user_ids = Some(visible);
                    Some(criteria)
                }
            }
        }
    }
}
