//! Project rows.

use reportflow_core::project::{Project, ProjectStatus};
use reportflow_core::store::StoreResult;
use reportflow_core::types::{CalendarDay, DepartmentId, ProjectId, Timestamp};
use sqlx::FromRow;

use super::corrupt_column;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub department_id: String,
    pub status: String,
    pub start_date: CalendarDay,
    pub end_date: Option<CalendarDay>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectRow {
    pub fn into_project(self) -> StoreResult<Project> {
        let status = ProjectStatus::parse(&self.status)
            .ok_or_else(|| corrupt_column("projects", "status", &self.status))?;
        Ok(Project {
            id: ProjectId::new(self.id),
            name: self.name,
            description: self.description,
            department_id: DepartmentId::new(self.department_id),
            status,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
