//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- The authenticated, active user behind a Bearer token.
//! - [`rbac::RequireManager`] -- Requires `manager` or `admin`.
//! - [`rbac::RequireAdmin`] -- Requires `admin`.

pub mod auth;
pub mod rbac;
