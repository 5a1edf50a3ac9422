//! Domain layer - Core business logic and entities

pub mod error;
pub mod user;
pub mod validation;

pub use error::DomainError;
pub use user::{NewUser, User, UserFilter, UserId, UserRepository};
pub use validation::{FieldSchema, Schema, ValidationErrors};
