use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// One-way salted password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hashes `password` with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Returns true iff `password` matches `hashed_password`.
    /// Any verification failure, including a malformed hash, counts as a mismatch.
    fn verify(&self, password: &str, hashed_password: &str) -> bool;
}

/// bcrypt-backed hasher with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        if password.is_empty() {
            return Err(AppError::BadRequest("Password cannot be empty.".into()));
        }
        Ok(hash(password, self.cost)?)
    }

    fn verify(&self, password: &str, hashed_password: &str) -> bool {
        if password.trim().is_empty() {
            return false;
        }
        match verify(password, hashed_password) {
            Ok(matches) => matches,
            Err(e) => {
                log::debug!("password verification failed: {}", e);
                false
            }
        }
    }
}
