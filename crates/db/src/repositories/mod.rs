//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and return raw rows.

pub mod comment_repo;
pub mod daily_report_repo;
pub mod department_repo;
pub mod project_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use daily_report_repo::DailyReportRepo;
pub use department_repo::DepartmentRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
