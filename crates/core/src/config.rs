//! Workflow policy configuration.

use std::str::FromStr;

use crate::error::CoreError;

/// How far a manager's approval and search rights reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManagerScope {
    /// Any manager may approve, reject, and search every report (same breadth as admin).
    #[default]
    Unrestricted,
    /// A manager may act on and search only their own and their direct reports' reports.
    DirectReports,
}

impl FromStr for ManagerScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "unrestricted" => Ok(ManagerScope::Unrestricted),
            "direct_reports" => Ok(ManagerScope::DirectReports),
            other => Err(CoreError::validation(format!(
                "Invalid manager scope '{other}'. Must be 'unrestricted' or 'direct_reports'"
            ))),
        }
    }
}

/// Policy knobs consumed by the workflows.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowConfig {
    pub manager_scope: ManagerScope,
}
