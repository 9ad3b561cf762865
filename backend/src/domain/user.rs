//! User identity and profile types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum accepted display-name length.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Stable user identifier.
///
/// Identities are derived deterministically from the login name so the same
/// visitor resolves to the same id across sessions without a user database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Derive the identifier for a login name.
    pub fn from_username(username: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, username.as_bytes()))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Validation failures for [`DisplayName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayNameError {
    /// Name is empty once trimmed.
    #[error("display name must not be empty")]
    Empty,
    /// Name exceeds [`DISPLAY_NAME_MAX`] characters.
    #[error("display name must be at most {DISPLAY_NAME_MAX} characters")]
    TooLong,
}

/// Human-readable name shown next to comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a display name.
    pub fn new(value: impl Into<String>) -> Result<Self, DisplayNameError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DisplayNameError::Empty);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(DisplayNameError::TooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for DisplayName {
    type Error = DisplayNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

/// Profile record served by `GET /userInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable identity the profile belongs to.
    pub id: UserId,
    /// Name rendered on the page.
    pub display_name: DisplayName,
    /// Contact address recorded at first login.
    pub email: String,
}

/// Validation failures for [`LoginCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// Username is empty once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login request payload.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Validate raw username/password input.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// The login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// The supplied password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
