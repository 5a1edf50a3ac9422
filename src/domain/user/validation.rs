//! Registration request schema

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::domain::validation::{FieldSchema, Schema};

pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 255;
pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 255;

static REGISTRATION_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        FieldSchema::string("email")
            .trim()
            .email("Please provide a valid email address")
            .max(
                MAX_EMAIL_LENGTH,
                format!("Email must be at most {MAX_EMAIL_LENGTH} characters long"),
            )
            .required("Email is required"),
        FieldSchema::string("password")
            .trim()
            .min(
                MIN_PASSWORD_LENGTH,
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
            )
            .max(
                MAX_PASSWORD_LENGTH,
                format!("Password must be at most {MAX_PASSWORD_LENGTH} characters long"),
            )
            .required("Password is required"),
        FieldSchema::string("name")
            .trim()
            .min(
                MIN_NAME_LENGTH,
                format!("Name must be at least {MIN_NAME_LENGTH} characters long"),
            )
            .max(
                MAX_NAME_LENGTH,
                format!("Name must be at most {MAX_NAME_LENGTH} characters long"),
            )
            .required("Name is required"),
    ])
});

/// Schema for the public registration request
pub fn registration_schema() -> &'static Schema {
    &REGISTRATION_SCHEMA
}

/// Validated registration input with every field trimmed
#[derive(Clone, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUser")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}
