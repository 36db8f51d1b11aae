pub mod auth;
pub mod daily_reports;
pub mod users;
