//! Async workflows composed from the pure rules and the collaborator traits.

mod daily_report;
mod user;

pub use daily_report::DailyReportWorkflow;
pub use user::UserWorkflow;
