//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Lookup criteria for a single user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Id(UserId),
    Email(String),
}

impl UserFilter {
    pub fn email(email: impl Into<String>) -> Self {
        Self::Email(email.into())
    }

    /// Whether `user` satisfies the filter
    pub fn matches(&self, user: &User) -> bool {
        match self {
            Self::Id(id) => user.id() == *id,
            Self::Email(email) => user.email() == email,
        }
    }
}

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Find the first user matching the filter
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, DomainError>;

    /// Store a new user and return it with its assigned ID.
    ///
    /// Fails with [`DomainError::Conflict`] when the email is already taken.
    async fn insert_one(&self, user: NewUser) -> Result<User, DomainError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
