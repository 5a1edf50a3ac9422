//! User infrastructure module
//!
//! This module provides password hashing with Argon2, the SQLite-backed user
//! repository, and the user service running the registration workflow.

mod password;
mod service;
mod sqlite_repository;

pub use password::{Argon2Hasher, PasswordHasher};
pub use service::{
    UserService, CREATE_FAILED_MESSAGE, HASH_FAILED_MESSAGE, USER_EXISTS_MESSAGE,
};
pub use sqlite_repository::SqliteUserRepository;

#[cfg(test)]
pub(crate) use password::tests::fast_hasher;
