use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation messages keyed by form field name.
///
/// Each field carries at most one message; inserting again replaces it.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Overlay another set of annotations on top of this one.
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_field() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required");
        errors.insert("name", "Name must be at least 2 characters");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Name must be at least 2 characters"));
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let mut errors: FieldErrors = [("name", "old"), ("email", "bad")].into_iter().collect();
        errors.merge([("name", "new")].into_iter().collect());
        assert_eq!(errors.get("name"), Some("new"));
        assert_eq!(errors.get("email"), Some("bad"));
    }

    #[test]
    fn test_deserialize_from_map() {
        let errors: FieldErrors =
            serde_json::from_str(r#"{"name": "Name is required"}"#).unwrap();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.to_string(), "name: Name is required");
    }
}
