//! Declarative request validation
//!
//! A [`Schema`] is a list of named string fields, each carrying an ordered
//! list of [`Constraint`]s. Parsing a raw JSON value against a schema either
//! yields the sanitized (trimmed) values deserialized into a destination type,
//! or a [`ValidationErrors`] map keyed by field name.
//!
//! The schema knows nothing about the destination type; `serde` fills it from
//! the sanitized values once every constraint has passed.

mod errors;

pub use errors::{ValidationErrors, FALLBACK_MESSAGE, FIRST_KEY, ROOT_KEY};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;
use validator::ValidateEmail;

/// Message for a present value of the wrong JSON type
pub const TYPE_MESSAGE: &str = "Must be a string";

/// A single rule applied to a string field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Strip surrounding whitespace before any test runs
    Trim,
    /// Value must be present and non-empty
    Required { message: String },
    /// Minimum length in characters
    MinLength { min: usize, message: String },
    /// Maximum length in characters
    MaxLength { max: usize, message: String },
    /// Value must be a syntactically valid email address
    Email { message: String },
}

impl Constraint {
    /// Run the test part of the constraint, returning its message on failure
    fn test(&self, value: &str) -> Option<&str> {
        let failed = match self {
            Self::Trim | Self::Required { .. } => false,
            Self::MinLength { min, .. } => value.chars().count() < *min,
            Self::MaxLength { max, .. } => value.chars().count() > *max,
            Self::Email { .. } => !value.validate_email(),
        };

        if !failed {
            return None;
        }

        match self {
            Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::Email { message } => Some(message.as_str()),
            Self::Trim | Self::Required { .. } => None,
        }
    }
}

/// Constraints for one named string field
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: String,
    constraints: Vec<Constraint>,
}

impl FieldSchema {
    /// Start a schema for a string field
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }

    pub fn trim(mut self) -> Self {
        self.constraints.push(Constraint::Trim);
        self
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint::Required {
            message: message.into(),
        });
        self
    }

    pub fn min(mut self, min: usize, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint::MinLength {
            min,
            message: message.into(),
        });
        self
    }

    pub fn max(mut self, max: usize, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint::MaxLength {
            max,
            message: message.into(),
        });
        self
    }

    pub fn email(mut self, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint::Email {
            message: message.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn required_message(&self) -> Option<&str> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Required { message } => Some(message.as_str()),
            _ => None,
        })
    }

    fn trims(&self) -> bool {
        self.constraints.contains(&Constraint::Trim)
    }

    /// Check a raw value.
    ///
    /// Returns the sanitized value (`None` for an absent optional field) or
    /// every failing message in declaration order. An absent or empty required
    /// value reports only the required message.
    pub fn check(&self, raw: Option<&Value>) -> Result<Option<String>, Vec<String>> {
        let value = match raw {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.as_str()),
            Some(_) => return Err(vec![TYPE_MESSAGE.to_string()]),
        };

        let value = value
            .map(|v| if self.trims() { v.trim() } else { v })
            .filter(|v| !v.is_empty());

        let Some(value) = value else {
            return match self.required_message() {
                Some(message) => Err(vec![message.to_string()]),
                None => Ok(None),
            };
        };

        let failures: Vec<String> = self
            .constraints
            .iter()
            .filter_map(|c| c.test(value))
            .map(str::to_string)
            .collect();

        if failures.is_empty() {
            Ok(Some(value.to_string()))
        } else {
            Err(failures)
        }
    }
}

/// An object schema made of string fields
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSchema>,
    root_message: String,
}

impl Schema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self {
            fields,
            root_message: String::new(),
        }
    }

    /// Message reported when the input is not an object.
    ///
    /// Empty by default, which the sanitized map replaces with
    /// [`FALLBACK_MESSAGE`].
    pub fn with_root_message(mut self, message: impl Into<String>) -> Self {
        self.root_message = message.into();
        self
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Validate `input` and return the sanitized values keyed by field name.
    ///
    /// Keys not named by the schema are dropped.
    pub fn sanitize(&self, input: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let Value::Object(object) = input else {
            return Err(ValidationErrors::root(self.root_message.clone()));
        };

        let mut errors = ValidationErrors::new();
        let mut sanitized = Map::new();

        for field in &self.fields {
            match field.check(object.get(field.name())) {
                Ok(Some(value)) => {
                    sanitized.insert(field.name().to_string(), Value::String(value));
                }
                Ok(None) => {}
                Err(messages) => errors.add_field(field.name(), messages),
            }
        }

        if errors.is_empty() {
            Ok(sanitized)
        } else {
            Err(errors)
        }
    }

    /// Validate `input` and deserialize the sanitized values into `T`
    pub fn parse<T: DeserializeOwned>(&self, input: &Value) -> Result<T, ValidationErrors> {
        let sanitized = self.sanitize(input)?;

        serde_json::from_value(Value::Object(sanitized)).map_err(|e| {
            debug!(error = %e, "sanitized request does not fit destination type");
            ValidationErrors::root(self.root_message.clone())
        })
    }
}
