//! User accounts: entity, inputs, and account-level validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::{deserialize_nullable, DepartmentId, Timestamp, UserId};

/// Minimum password length accepted on create and change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// A user account as seen by the workflows. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub department_id: DepartmentId,
    /// Back-reference to this user's manager. Not ownership.
    pub manager_id: Option<UserId>,
    pub is_active: bool,
    /// Identifier in the external chat integration.
    pub external_chat_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user together with the stored password hash, used only for credential checks.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub department_id: DepartmentId,
    pub manager_id: Option<UserId>,
    pub external_chat_id: Option<String>,
}

/// Partial profile update. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub department_id: Option<DepartmentId>,
    /// `Some(None)` removes the manager.
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub manager_id: Option<Option<UserId>>,
    pub is_active: Option<bool>,
    pub external_chat_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSearchCriteria {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub department_id: Option<DepartmentId>,
    pub manager_id: Option<UserId>,
    pub is_active: Option<bool>,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least [`MIN_PASSWORD_LENGTH`] characters with an uppercase letter, a
/// lowercase letter, and a digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
}
