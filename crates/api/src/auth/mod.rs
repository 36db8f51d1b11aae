//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, wired into the workflows as a
//!   [`reportflow_core::store::PasswordHasher`].
//! - [`jwt`] -- HS256 access-token generation and validation.

pub mod jwt;
pub mod password;
