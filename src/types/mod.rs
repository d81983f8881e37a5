mod field_errors;
mod status;
mod user;

pub use field_errors::FieldErrors;
pub use status::{StatusKind, StatusMessage};
pub use user::{User, UserRequest};
