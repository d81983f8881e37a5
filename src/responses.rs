//! Response bodies shared across operations.

use serde::{Deserialize, Serialize};

use crate::types::FieldErrors;

/// Body of a 400 response.
///
/// Backends that validate per field send `fields`; other keys such as
/// `error` and `message` are ignored.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ValidationErrorBody {
    #[serde(default)]
    pub fields: Option<FieldErrors>,
}

impl ValidationErrorBody {
    /// Parse leniently; an unreadable body is treated as carrying no fields.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Field annotations, if the body named at least one field.
    pub fn into_fields(self) -> Option<FieldErrors> {
        self.fields.filter(|fields| !fields.is_empty())
    }
}
