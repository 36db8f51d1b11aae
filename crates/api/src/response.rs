//! Shared response envelope for API handlers.
//!
//! Successful responses use a `{ "data": ... }` envelope. Prefer
//! [`DataResponse`] over ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: report }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
