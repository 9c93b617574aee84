use std::sync::Arc;

use crate::auth::{BcryptHasher, PasswordHasher, TokenService};
use crate::config::Config;
use crate::error::AppError;
use crate::seed;
use crate::services::{AuthService, TaskService};
use crate::store::{InMemoryTaskStore, InMemoryUserStore, TaskStore, UserStore};

/// Shared state handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tasks: TaskService,
    /// Used by `AuthMiddleware` to verify bearer tokens.
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenService,
    ) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&users), hasher, tokens.clone()),
            tasks: TaskService::new(tasks, users),
            tokens,
        }
    }

    /// Wires the in-memory stores and bcrypt hasher from `config`, loading the demo
    /// data when `seed_demo_data` is set.
    pub fn in_memory(config: &Config) -> Result<Self, AppError> {
        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let tasks: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new(config.bcrypt_cost));
        let tokens = TokenService::new(&config.jwt)?;

        if config.seed_demo_data {
            seed::seed_demo_data(users.as_ref(), tasks.as_ref(), hasher.as_ref())?;
        }

        Ok(Self::new(users, tasks, hasher, tokens))
    }
}
