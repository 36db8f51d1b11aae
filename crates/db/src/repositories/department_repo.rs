//! Repository for the `departments` table.

use sqlx::PgPool;

use crate::models::department::Department;

const COLUMNS: &str = "id, name, description, created_at, updated_at";

pub struct DepartmentRepo;

impl DepartmentRepo {
    pub async fn create(
        pool: &PgPool,
        id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(name)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
