pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::UserProfile;

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{BcryptHasher, PasswordHasher};
pub use token::{Claims, IssuedToken, TokenService};

lazy_static! {
    // Regex for username validation: letters, digits, underscores
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
}

/// Represents the payload for a user login request.
/// Only presence is checked here; password strength is a registration concern.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom = "validate_login_username")]
    pub username: String,
    #[serde(default)]
    #[validate(custom = "validate_login_password")]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Must be between 3 and 50 characters: letters, digits and underscores.
    #[serde(default)]
    #[validate(
        length(min = 3, max = 50, message = "Username must be between 3 and 50 characters long."),
        regex(
            path = "USERNAME_REGEX",
            message = "Username can only contain letters, numbers, and underscores."
        )
    )]
    pub username: String,
    #[serde(default)]
    #[validate(
        email(message = "Email must be in valid format."),
        length(max = 255, message = "Email cannot exceed 255 characters.")
    )]
    pub email: String,
    /// At least 8 characters with an uppercase letter, a lowercase letter and a digit.
    #[serde(default)]
    #[validate(custom = "validate_password_strength")]
    pub password: String,
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The signed bearer token.
    pub token: String,
    /// The instant the token stops being accepted.
    pub expires: DateTime<Utc>,
    pub user: UserProfile,
}

fn rejection(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

fn validate_login_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        Err(rejection("required", "Username is required."))
    } else if username.chars().count() > 50 {
        Err(rejection("length", "Username cannot exceed 50 characters."))
    } else {
        Ok(())
    }
}

fn validate_login_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(rejection("required", "Password is required."));
    }
    Ok(())
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let message = if password.chars().count() < 8 {
        "Password must be at least 8 characters long."
    } else if !(password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit()))
    {
        "Password must contain at least one uppercase letter, one lowercase letter, and one number."
    } else {
        return Ok(());
    };
    Err(rejection("password_strength", message))
}
