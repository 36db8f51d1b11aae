//! User roles and role-level capabilities.
//!
//! The role names must match the `users.role` check constraint in the
//! `20240101000002_create_users.sql` migration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EMPLOYEE: &str = "employee";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER, ROLE_EMPLOYEE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Manager => ROLE_MANAGER,
            Role::Employee => ROLE_EMPLOYEE,
        }
    }

    /// Report-management capability: approve, reject, and comment on anyone's report.
    pub fn can_manage_daily_reports(self) -> bool {
        match self {
            Role::Admin | Role::Manager => true,
            Role::Employee => false,
        }
    }

    /// Only admins manage other users' accounts.
    pub fn can_manage_users(self) -> bool {
        match self {
            Role::Admin => true,
            Role::Manager | Role::Employee => false,
        }
    }

    /// Whether this role may be referenced as another user's manager.
    pub fn can_supervise(self) -> bool {
        self.can_manage_daily_reports()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_MANAGER => Ok(Role::Manager),
            ROLE_EMPLOYEE => Ok(Role::Employee),
            other => Err(CoreError::validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}
