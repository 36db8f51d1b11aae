//! Repository for the `projects` table.

use reportflow_core::project::Project;
use sqlx::PgPool;

use crate::models::project::ProjectRow;

const COLUMNS: &str = "id, name, description, department_id, status, start_date, end_date, \
                       is_active, created_at, updated_at";

/// Provides lookups for projects referenced by report tasks.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project. Ids are assigned by the caller.
    pub async fn create(pool: &PgPool, project: &Project) -> Result<ProjectRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (id, name, description, department_id, status, start_date, end_date,
                 is_active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(project.id.as_str())
            .bind(&project.name)
            .bind(&project.description)
            .bind(project.department_id.as_str())
            .bind(project.status.as_str())
            .bind(project.start_date)
            .bind(project.end_date)
            .bind(project.is_active)
            .bind(project.created_at)
            .bind(project.updated_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Projects whose id is in `ids`. Unknown ids are skipped.
    pub async fn find_by_ids(
        pool: &PgPool,
        ids: &[String],
    ) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
