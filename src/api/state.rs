//! Application state for shared services

use std::sync::Arc;

use serde_json::Value;

use crate::config::AppConfig;
use crate::domain::user::UserRepository;
use crate::domain::{DomainError, User};
use crate::infrastructure::user::{PasswordHasher, UserService};

/// Application state built once at startup and handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(config: AppConfig, user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self {
            config: Arc::new(config),
            user_service,
        }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Run the registration workflow on a raw request body
    async fn register(&self, raw: &Value) -> Result<User, DomainError>;
    /// Check that the user store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, raw: &Value) -> Result<User, DomainError> {
        UserService::register(self, raw).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        UserService::ping(self).await
    }
}
