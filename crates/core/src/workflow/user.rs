//! User account workflows: registration, profile changes, credentials.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::store::{AccountStore, PasswordHasher, StoreError, UserStore};
use crate::types::UserId;
use crate::user::{
    is_strong_password, is_valid_email, AuthenticateInput, ChangePasswordInput, CreateUserInput,
    UpdateUserInput, User, UserSearchCriteria, MIN_PASSWORD_LENGTH,
};
use crate::validation::{is_blank, validate_required_text};

/// Shared by unknown-email and wrong-password failures so callers cannot probe accounts.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct UserWorkflow {
    accounts: Arc<dyn AccountStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserWorkflow {
    pub fn new(accounts: Arc<dyn AccountStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { accounts, hasher }
    }

    pub async fn create_user(&self, input: CreateUserInput) -> CoreResult<User> {
        validate_email(&input.email)?;
        validate_password(&input.password, "password")?;
        validate_required_text(&input.name, "name", "Name")?;

        if self.accounts.find_by_email(&input.email).await?.is_some() {
            return Err(email_taken(&input.email));
        }

        if let Some(manager_id) = &input.manager_id {
            self.require_supervisor(manager_id).await?;
        }

        let password_hash = self.hasher.hash(&input.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::generate(),
            email: input.email,
            name: input.name,
            role: input.role,
            department_id: input.department_id,
            manager_id: input.manager_id,
            is_active: true,
            external_chat_id: input.external_chat_id,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .accounts
            .create(&user, &password_hash)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(_) => email_taken(&user.email),
                other => other.into(),
            })?;

        tracing::info!(user_id = %created.id, role = %created.role, "User created");
        Ok(created)
    }

    /// Partial profile update. A changed email is validated and checked for
    /// collisions; a changed manager must exist and be able to supervise.
    pub async fn update_user(&self, id: &UserId, input: UpdateUserInput) -> CoreResult<User> {
        let user = self.get_user(id).await?;

        if let Some(email) = &input.email {
            if *email != user.email {
                validate_email(email)?;
                if self.accounts.find_by_email(email).await?.is_some() {
                    return Err(email_taken(email));
                }
            }
        }

        if let Some(name) = &input.name {
            validate_required_text(name, "name", "Name")?;
        }

        if let Some(Some(manager_id)) = &input.manager_id {
            if manager_id == id {
                return Err(CoreError::BusinessRule(
                    "A user cannot be their own manager".to_string(),
                ));
            }
            if user.manager_id.as_ref() != Some(manager_id) {
                self.require_supervisor(manager_id).await?;
            }
        }

        let updated = User {
            email: input.email.unwrap_or(user.email),
            name: input.name.unwrap_or(user.name),
            role: input.role.unwrap_or(user.role),
            department_id: input.department_id.unwrap_or(user.department_id),
            manager_id: input.manager_id.unwrap_or(user.manager_id),
            is_active: input.is_active.unwrap_or(user.is_active),
            external_chat_id: input.external_chat_id.or(user.external_chat_id),
            updated_at: Utc::now(),
            ..user
        };

        let saved = self.accounts.update(&updated).await.map_err(|e| match e {
            StoreError::UniqueViolation(_) => email_taken(&updated.email),
            other => other.into(),
        })?;

        tracing::info!(user_id = %saved.id, "User updated");
        Ok(saved)
    }

    pub async fn change_password(&self, id: &UserId, input: ChangePasswordInput) -> CoreResult<()> {
        let credentials = self
            .accounts
            .find_credentials_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))?;

        if !self
            .hasher
            .verify(&input.current_password, &credentials.password_hash)?
        {
            return Err(CoreError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }

        validate_password(&input.new_password, "new_password")?;

        let password_hash = self.hasher.hash(&input.new_password)?;
        self.accounts.update_password(id, &password_hash).await?;

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    /// Verify credentials and return the account.
    pub async fn authenticate(&self, input: AuthenticateInput) -> CoreResult<User> {
        let Some(credentials) = self
            .accounts
            .find_credentials_by_email(&input.email)
            .await?
        else {
            tracing::debug!("Login attempt for unknown email");
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !credentials.user.is_active {
            return Err(CoreError::Forbidden("Account is deactivated".to_string()));
        }

        if !self
            .hasher
            .verify(&input.password, &credentials.password_hash)?
        {
            tracing::debug!(user_id = %credentials.user.id, "Login attempt with wrong password");
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        Ok(credentials.user)
    }

    pub async fn get_user(&self, id: &UserId) -> CoreResult<User> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    /// Users whose manager is `manager_id`. The manager must be able to supervise.
    pub async fn list_subordinates(&self, manager_id: &UserId) -> CoreResult<Vec<User>> {
        let manager = self.get_user(manager_id).await?;
        if !manager.role.can_supervise() {
            return Err(CoreError::Forbidden(
                "Only managers and admins have subordinates".to_string(),
            ));
        }
        Ok(self.accounts.find_subordinates(manager_id).await?)
    }

    pub async fn search_users(&self, criteria: UserSearchCriteria) -> CoreResult<Vec<User>> {
        Ok(self.accounts.search(&criteria).await?)
    }

    async fn require_supervisor(&self, manager_id: &UserId) -> CoreResult<User> {
        let manager = self
            .accounts
            .find_by_id(manager_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Manager {manager_id} not found")))?;
        if !manager.role.can_supervise() {
            return Err(CoreError::BusinessRule(format!(
                "User {manager_id} cannot be assigned as a manager"
            )));
        }
        Ok(manager)
    }
}

fn validate_email(email: &str) -> CoreResult<()> {
    if is_blank(email) || !is_valid_email(email) {
        return Err(CoreError::validation_field("Invalid email address", "email"));
    }
    Ok(())
}

fn validate_password(password: &str, field: &str) -> CoreResult<()> {
    if !is_strong_password(password) {
        return Err(CoreError::validation_field(
            format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters and contain \
                 uppercase, lowercase, and a digit"
            ),
            field,
        ));
    }
    Ok(())
}

fn email_taken(email: &str) -> CoreError {
    CoreError::AlreadyExists(format!("A user with email {email} already exists"))
}

fn user_not_found(id: &UserId) -> CoreError {
    CoreError::NotFound(format!("User {id} not found"))
}
