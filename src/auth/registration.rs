//! Member registration for clubboard.

use thiserror::Error;
use tracing::info;

use super::password::{Hasher, PasswordError};
use super::validation::{
    is_blank, validate_email, validate_id, validate_name, validate_nickname, validate_password,
    validate_phone, ValidationError,
};
use crate::db::{NewUser, User, UserRepository};
use crate::BoardError;

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Identifier already taken.
    #[error("user id already exists")]
    IdExists,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

impl From<RegistrationError> for BoardError {
    fn from(e: RegistrationError) -> Self {
        match e {
            RegistrationError::Validation(v) => BoardError::Validation(v.to_string()),
            RegistrationError::IdExists => BoardError::Duplicate("user id".to_string()),
            RegistrationError::Password(p) => BoardError::Password(p.to_string()),
            RegistrationError::Database(msg) => BoardError::Database(msg),
        }
    }
}

/// Registration request data.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    /// Desired login identifier (case sensitive).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Plaintext password.
    pub password: String,
    /// Must equal `password`.
    pub confirm_password: String,
    /// Optional phone number; blank means none.
    pub phone_number: Option<String>,
    /// Email address.
    pub email: String,
    /// Nickname shown next to posts.
    pub nickname: String,
}

impl RegistrationRequest {
    /// Create a request whose confirmation equals the password.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            id: id.into(),
            name: name.into(),
            confirm_password: password.clone(),
            password,
            phone_number: None,
            email: email.into(),
            nickname: nickname.into(),
        }
    }

    /// Set the confirmation separately.
    pub fn with_confirm_password(mut self, confirm: impl Into<String>) -> Self {
        self.confirm_password = confirm.into();
        self
    }

    /// Set the phone number.
    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Validate every field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(&self.id)?;
        validate_name(&self.name)?;
        validate_password(&self.password, &self.confirm_password)?;
        validate_email(&self.email)?;
        validate_nickname(&self.nickname)?;
        validate_phone(self.phone_number.as_deref())?;
        Ok(())
    }
}

/// Register a new member.
///
/// Validates the request, rejects a taken identifier, hashes the password
/// and stores the user with no session.
pub async fn register(
    repo: &UserRepository<'_>,
    hasher: &Hasher,
    request: RegistrationRequest,
) -> Result<User, RegistrationError> {
    request.validate()?;

    if repo
        .exists(&request.id)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?
    {
        return Err(RegistrationError::IdExists);
    }

    let digest = hasher.hash(&request.password)?;

    let mut new_user = NewUser::new(
        &request.id,
        &request.name,
        digest,
        &request.email,
        &request.nickname,
    );
    if let Some(phone) = request.phone_number.as_deref().filter(|p| !is_blank(p)) {
        new_user = new_user.with_phone_number(phone);
    }

    // A concurrent registration can still win between the check and the insert.
    let user = repo.create(&new_user).await.map_err(|e| match e {
        BoardError::Duplicate(_) => RegistrationError::IdExists,
        other => RegistrationError::Database(other.to_string()),
    })?;

    info!(user_id = %user.id, "New user registered");

    Ok(user)
}
