//! In-memory persistence behind `UserStore` and `TaskStore`.
//!
//! Each store guards its whole collection with one `RwLock`, so id assignment and
//! insertion happen atomically.

pub mod task;
pub mod user;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::AppError;

pub use task::{InMemoryTaskStore, TaskStore};
pub use user::{InMemoryUserStore, UserStore};

fn read_lock<'a, T>(lock: &'a RwLock<T>, store: &str) -> Result<RwLockReadGuard<'a, T>, AppError> {
    lock.read()
        .map_err(|_| AppError::InternalServerError(format!("{} store lock poisoned", store)))
}

fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    store: &str,
) -> Result<RwLockWriteGuard<'a, T>, AppError> {
    lock.write()
        .map_err(|_| AppError::InternalServerError(format!("{} store lock poisoned", store)))
}
