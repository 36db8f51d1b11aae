//! Departments own users and projects; the workflows only carry their ids.

use reportflow_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
