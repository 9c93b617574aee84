use std::sync::RwLock;

use super::{read_lock, write_lock};
use crate::error::AppError;
use crate::models::{NewUser, User};

/// Storage for user accounts. Username and email lookups are case-insensitive.
pub trait UserStore: Send + Sync {
    /// Assigns the next sequential id and stores the user.
    fn create(&self, user: NewUser) -> Result<User, AppError>;

    fn get_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    fn username_exists(&self, username: &str) -> Result<bool, AppError>;

    fn email_exists(&self, email: &str) -> Result<bool, AppError>;
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find<P>(&self, predicate: P) -> Result<Option<User>, AppError>
    where
        P: Fn(&User) -> bool,
    {
        let users = read_lock(&self.users, "user")?;
        Ok(users.iter().find(|u| predicate(u)).cloned())
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl UserStore for InMemoryUserStore {
    fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = write_lock(&self.users, "user")?;

        // Uniqueness is re-checked under the write lock; callers pre-check for
        // the precise message.
        if users.iter().any(|u| same_text(&u.username, &user.username)) {
            return Err(AppError::Conflict("Username already exists.".into()));
        }
        if users.iter().any(|u| same_text(&u.email, &user.email)) {
            return Err(AppError::Conflict("Email already exists.".into()));
        }

        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = user.into_user(next_id);
        users.push(user.clone());
        Ok(user)
    }

    fn get_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        self.find(|u| u.id == id)
    }

    fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.find(|u| same_text(&u.username, username))
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find(|u| same_text(&u.email, email))
    }

    fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.get_by_username(username)?.is_some())
    }

    fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.get_by_email(email)?.is_some())
    }
}
