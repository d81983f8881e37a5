//! Client-side form checks run before a create or update is sent.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{FieldErrors, UserRequest};

const NAME_MIN_LEN: usize = 2;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Check a request the way the edit form does; any annotation blocks submission.
pub fn validate(request: &UserRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = request.name.trim();
    if name.is_empty() {
        errors.insert("name", "Name is required");
    } else if name.chars().count() < NAME_MIN_LEN {
        errors.insert("name", "Name must be at least 2 characters");
    }

    let email = request.email.trim();
    if email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.insert("email", "Please enter a valid email address");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
