//! User domain
//!
//! This module provides the user entity, the registration request schema,
//! and the repository trait the registration workflow stores users through.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use repository::{UserFilter, UserRepository};
pub use validation::{
    registration_schema, RegisterUser, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH,
    MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
