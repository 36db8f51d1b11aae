//! Repository for the `users` table.

use reportflow_core::user::{User, UserSearchCriteria};
use sqlx::PgPool;

use crate::models::user::UserRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, name, role, department_id, manager_id, \
                       is_active, external_chat_id, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user: &User,
        password_hash: &str,
    ) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (id, email, password_hash, name, role, department_id, manager_id,
                 is_active, external_chat_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id.as_str())
            .bind(&user.email)
            .bind(password_hash)
            .bind(&user.name)
            .bind(user.role.as_str())
            .bind(user.department_id.as_str())
            .bind(user.manager_id.as_ref().map(|m| m.as_str()))
            .bind(user.is_active)
            .bind(&user.external_chat_id)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Users whose `manager_id` is `manager_id`, by name.
    pub async fn find_by_manager(
        pool: &PgPool,
        manager_id: &str,
    ) -> Result<Vec<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE manager_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(manager_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the profile columns. The password hash is untouched.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(pool: &PgPool, user: &User) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = $2,
                name = $3,
                role = $4,
                department_id = $5,
                manager_id = $6,
                is_active = $7,
                external_chat_id = $8,
                updated_at = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id.as_str())
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.role.as_str())
            .bind(user.department_id.as_str())
            .bind(user.manager_id.as_ref().map(|m| m.as_str()))
            .bind(user.is_active)
            .bind(&user.external_chat_id)
            .bind(user.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: &str,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Filter users; text filters are case-insensitive substring matches.
    pub async fn search(
        pool: &PgPool,
        criteria: &UserSearchCriteria,
    ) -> Result<Vec<UserRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::TEXT IS NULL OR email ILIKE '%' || $1 || '%')
               AND ($2::TEXT IS NULL OR name ILIKE '%' || $2 || '%')
               AND ($3::TEXT IS NULL OR role = $3)
               AND ($4::TEXT IS NULL OR department_id = $4)
               AND ($5::TEXT IS NULL OR manager_id = $5)
               AND ($6::BOOL IS NULL OR is_active = $6)
             ORDER BY email"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(criteria.email.as_deref())
            .bind(criteria.name.as_deref())
            .bind(criteria.role.map(|r| r.as_str()))
            .bind(criteria.department_id.as_ref().map(|d| d.as_str()))
            .bind(criteria.manager_id.as_ref().map(|m| m.as_str()))
            .bind(criteria.is_active)
            .fetch_all(pool)
            .await
    }
}
