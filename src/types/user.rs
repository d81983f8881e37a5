use serde::{Deserialize, Serialize};

/// A user record as returned by the backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl User {
    /// Case-insensitive match of an already lower-cased term against name or email.
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.email.to_lowercase().contains(term)
    }
}

/// Body of create and update requests.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
}

impl UserRequest {
    /// Build a request from raw form input, trimming surrounding whitespace.
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        }
    }
}
