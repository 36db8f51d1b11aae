//! Translation of driver errors into collaborator failures.

use reportflow_core::store::StoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Classify a sqlx error for the workflows.
///
/// Unique constraint violations keep the constraint name so callers can tell
/// which identity collided. A write referencing a row that does not exist is
/// `Missing`; everything else is a backend fault.
pub fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => return StoreError::UniqueViolation(constraint.to_string()),
            Some(FOREIGN_KEY_VIOLATION) => {
                return StoreError::Missing(format!(
                    "Referenced record does not exist ({constraint})"
                ))
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    StoreError::Backend(err.to_string())
}
