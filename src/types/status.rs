use std::fmt;

use colored::Colorize;
use serde::Serialize;

/// Severity of the status line shown after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// The action succeeded
    Info,
    /// The action failed or was refused
    Warn,
}

impl StatusKind {
    /// Get the label for this kind.
    pub fn label(self) -> &'static str {
        match self {
            StatusKind::Info => "info",
            StatusKind::Warn => "warn",
        }
    }

    /// Render a message in this kind's terminal color.
    pub fn paint(self, text: &str) -> String {
        match self {
            StatusKind::Info => text.green().to_string(),
            StatusKind::Warn => text.yellow().bold().to_string(),
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The single status line of a directory session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warn,
            text: text.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.kind == StatusKind::Warn
    }
}
