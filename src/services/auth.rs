use chrono::Utc;
use std::sync::Arc;

use crate::auth::{LoginResponse, PasswordHasher, TokenService};
use crate::error::AppError;
use crate::models::{NewUser, UserProfile};
use crate::store::UserStore;

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// Registration, login and profile lookup.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Creates an account and returns its public profile.
    ///
    /// The username is checked before the email, so a request clashing on both
    /// reports the username.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AppError> {
        if self.users.username_exists(username)? {
            return Err(AppError::Conflict("Username already exists.".into()));
        }
        if self.users.email_exists(email)? {
            return Err(AppError::Conflict("Email already exists.".into()));
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self.users.create(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
        })?;

        log::info!("Registered user {} ({})", user.id, user.username);
        Ok(UserProfile::from(&user))
    }

    /// Verifies credentials and issues a bearer token.
    /// Unknown users and wrong passwords fail with the same message.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = match self.users.get_by_username(username)? {
            Some(user) if self.hasher.verify(password, &user.password_hash) => user,
            _ => {
                log::warn!("Failed login attempt");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
            }
        };

        let issued = self.tokens.issue(&user)?;
        log::info!("User {} logged in", user.id);

        Ok(LoginResponse {
            token: issued.token,
            expires: issued.expires,
            user: UserProfile::from(&user),
        })
    }

    pub fn get_profile(&self, user_id: i32) -> Result<Option<UserProfile>, AppError> {
        Ok(self.users.get_by_id(user_id)?.as_ref().map(UserProfile::from))
    }
}
