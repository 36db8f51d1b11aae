//! Row structs for the report tables.
//!
//! Each submodule contains a `FromRow` struct matching the database row and
//! the conversion into the corresponding `reportflow_core` entity. Text
//! columns holding enums are parsed here; an unknown value is a backend
//! fault, never a caller error.

pub mod comment;
pub mod daily_report;
pub mod department;
pub mod project;
pub mod user;

use reportflow_core::store::StoreError;

/// A stored enum column held a value the domain does not know.
pub(crate) fn corrupt_column(table: &str, column: &str, value: &str) -> StoreError {
    StoreError::Backend(format!("{table}.{column} holds unknown value '{value}'"))
}
