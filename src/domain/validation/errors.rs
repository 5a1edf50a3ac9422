//! Field error map returned when a request fails validation

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Synthetic key holding the first message of the whole error set
pub const FIRST_KEY: &str = "$first";

/// Synthetic key holding errors that belong to the request as a whole
pub const ROOT_KEY: &str = "$root";

/// Message used whenever the first error would otherwise be empty
pub const FALLBACK_MESSAGE: &str = "Invalid request";

/// Ordered collection of validation issues.
///
/// Root issues come first, then field issues in schema order. Serializes
/// to the sanitized map (see [`ValidationErrors::sanitize`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    root: Vec<String>,
    fields: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors consisting of a single request-level issue
    pub fn root(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_root(message);
        errors
    }

    pub fn add_root(&mut self, message: impl Into<String>) {
        self.root.push(message.into());
    }

    /// Append messages for a field, merging with any already recorded
    pub fn add_field(&mut self, field: impl Into<String>, messages: Vec<String>) {
        if messages.is_empty() {
            return;
        }

        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => existing.extend(messages),
            None => self.fields.push((field, messages)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.fields.is_empty()
    }

    pub fn root_messages(&self) -> &[String] {
        &self.root
    }

    /// Messages recorded for a field, if any
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, messages)| messages.as_slice())
    }

    /// The first message recorded, root issues taking precedence
    pub fn first(&self) -> Option<&str> {
        self.root
            .first()
            .or_else(|| self.fields.iter().find_map(|(_, messages)| messages.first()))
            .map(String::as_str)
    }

    /// Build the user-facing map.
    ///
    /// Field keys map to their messages, `$first` holds the first message and
    /// `$root` holds request-level messages when there are any. An empty first
    /// message is replaced with [`FALLBACK_MESSAGE`] under both `$first` and
    /// `$root`.
    pub fn sanitize(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = self
            .fields
            .iter()
            .map(|(field, messages)| (field.clone(), messages.clone()))
            .collect();

        if !self.root.is_empty() {
            map.insert(ROOT_KEY.to_string(), self.root.clone());
        }

        let first = self.first().unwrap_or_default();
        if first.is_empty() {
            map.insert(FIRST_KEY.to_string(), vec![FALLBACK_MESSAGE.to_string()]);

            let root = map.entry(ROOT_KEY.to_string()).or_default();
            match root.first_mut() {
                Some(message) => *message = FALLBACK_MESSAGE.to_string(),
                None => root.push(FALLBACK_MESSAGE.to_string()),
            }
        } else {
            map.insert(FIRST_KEY.to_string(), vec![first.to_string()]);
        }

        map
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(message) if !message.is_empty() => write!(f, "{}", message),
            _ => write!(f, "{}", FALLBACK_MESSAGE),
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sanitize().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_prefers_root() {
        let mut errors = ValidationErrors::new();
        errors.add_field("email", vec!["Email is required".to_string()]);
        errors.add_root("Body must be an object");

        assert_eq!(errors.first(), Some("Body must be an object"));
    }

    #[test]
    fn test_first_follows_field_order() {
        let mut errors = ValidationErrors::new();
        errors.add_field("password", vec!["Password is required".to_string()]);
        errors.add_field("email", vec!["Email is required".to_string()]);

        assert_eq!(errors.first(), Some("Password is required"));
    }

    #[test]
    fn test_add_field_merges_messages() {
        let mut errors = ValidationErrors::new();
        errors.add_field("name", vec!["first".to_string()]);
        errors.add_field("name", vec!["second".to_string()]);
        errors.add_field("name", vec![]);

        assert_eq!(errors.field("name").unwrap(), ["first", "second"]);
    }

    #[test]
    fn test_sanitize_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add_field(
            "email",
            vec!["Please provide a valid email address".to_string()],
        );

        let map = errors.sanitize();
        assert_eq!(map["email"], ["Please provide a valid email address"]);
        assert_eq!(map[FIRST_KEY], ["Please provide a valid email address"]);
        assert!(!map.contains_key(ROOT_KEY));
    }

    #[test]
    fn test_sanitize_replaces_empty_first_message() {
        let errors = ValidationErrors::root("");

        let map = errors.sanitize();
        assert_eq!(map[FIRST_KEY], [FALLBACK_MESSAGE]);
        assert_eq!(map[ROOT_KEY], [FALLBACK_MESSAGE]);
    }

    #[test]
    fn test_sanitize_empty_field_message_creates_root() {
        let mut errors = ValidationErrors::new();
        errors.add_field("name", vec![String::new()]);

        let map = errors.sanitize();
        assert_eq!(map[FIRST_KEY], [FALLBACK_MESSAGE]);
        assert_eq!(map[ROOT_KEY], [FALLBACK_MESSAGE]);
    }

    #[test]
    fn test_serialization_matches_sanitized_map() {
        let errors = ValidationErrors::root("");
        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(json["$first"][0], "Invalid request");
        assert_eq!(json["$root"][0], "Invalid request");
    }

    #[test]
    fn test_display_never_empty() {
        assert_eq!(ValidationErrors::root("").to_string(), FALLBACK_MESSAGE);
        assert_eq!(ValidationErrors::new().to_string(), FALLBACK_MESSAGE);
    }
}
