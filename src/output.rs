use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::types::{FieldErrors, StatusMessage, User};

/// Global output settings
static OUTPUT_FORMAT: AtomicU8 = AtomicU8::new(0);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    let value = match format {
        OutputFormat::Table => 0,
        OutputFormat::Json => 1,
        OutputFormat::Compact => 2,
    };
    OUTPUT_FORMAT.store(value, Ordering::Relaxed);
}

pub fn format() -> OutputFormat {
    match OUTPUT_FORMAT.load(Ordering::Relaxed) {
        1 => OutputFormat::Json,
        2 => OutputFormat::Compact,
        _ => OutputFormat::Table,
    }
}

pub fn is_json_output() -> bool {
    matches!(format(), OutputFormat::Json)
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: truncate(&user.name, 40),
            email: truncate(&user.email, 40),
        }
    }
}

/// Print users as a table, JSON, or one line each
pub fn print_users(users: &[&User]) {
    match format() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(users).unwrap_or_default());
        }
        OutputFormat::Compact => {
            for user in users {
                println!("{}\t{}\t{}", user.id, user.name, user.email);
            }
        }
        OutputFormat::Table if users.is_empty() => {
            println!("{}", "No users available.".bright_black());
        }
        OutputFormat::Table => {
            let rows: Vec<UserRow> = users.iter().map(|u| UserRow::from(*u)).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
}

/// Print a single user
pub fn print_user(user: &User) {
    print_item(user, |u| match format() {
        OutputFormat::Compact => println!("{}\t{}\t{}", u.id, u.name, u.email),
        _ => {
            println!("{} {}", format!("#{}", u.id).bold(), u.name);
            println!("Email: {}", u.email);
        }
    });
}

/// Print a single item or JSON depending on output mode
pub fn print_item<T: Serialize>(item: &T, display: impl FnOnce(&T)) {
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
    } else {
        display(item);
    }
}

/// Print a success message (skipped in quiet mode)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if is_json_output() {
        println!("{}", serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

/// Print a status line in its kind's color
pub fn print_status(status: &StatusMessage) {
    if is_json_output() {
        println!("{}", serde_json::to_string(status).unwrap_or_default());
    } else if status.is_warning() {
        eprintln!("{}", status.kind.paint(&status.text));
    } else if !is_quiet() {
        println!("{}", status.kind.paint(&status.text));
    }
}

/// Print one annotation per field to stderr
pub fn print_field_errors(errors: &FieldErrors) {
    if is_json_output() {
        eprintln!("{}", serde_json::json!({ "fields": errors }));
        return;
    }
    for (field, message) in errors.iter() {
        eprintln!("{}: {}", field.bold(), message.red());
    }
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("Alice", 10), "Alice");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("Alexandra Montgomery", 10), "Alexand...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Árpád Éva Ödön", 8), "Árpád...");
    }
}
