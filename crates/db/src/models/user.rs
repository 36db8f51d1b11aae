//! User rows and credential conversion.

use std::str::FromStr;

use reportflow_core::roles::Role;
use reportflow_core::store::{StoreError, StoreResult};
use reportflow_core::types::{DepartmentId, Timestamp, UserId};
use reportflow_core::user::{User, UserCredentials};
use sqlx::FromRow;

use super::corrupt_column;

/// A row from the `users` table, including the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub department_id: String,
    pub manager_id: Option<String>,
    pub is_active: bool,
    pub external_chat_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRow {
    /// Split the row into the public user and its hash.
    pub fn into_credentials(self) -> StoreResult<UserCredentials> {
        let role =
            Role::from_str(&self.role).map_err(|_| corrupt_column("users", "role", &self.role))?;
        Ok(UserCredentials {
            password_hash: self.password_hash,
            user: User {
                id: UserId::new(self.id),
                email: self.email,
                name: self.name,
                role,
                department_id: DepartmentId::new(self.department_id),
                manager_id: self.manager_id.map(UserId::new),
                is_active: self.is_active,
                external_chat_id: self.external_chat_id,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        })
    }

    pub fn into_user(self) -> StoreResult<User> {
        self.into_credentials().map(|c| c.user)
    }
}

/// Convert a batch of rows, failing on the first corrupt one.
pub fn into_users(rows: Vec<UserRow>) -> Result<Vec<User>, StoreError> {
    rows.into_iter().map(UserRow::into_user).collect()
}
