//! Diagnostic severity levels ordered from least to most severe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of a normalized diagnostic.
///
/// Ordered from least severe (`Info`) to most severe (`Error`), matching the
/// derived `PartialOrd`/`Ord` implementation based on declaration order.
/// Serialized in lowercase (`"error"`, `"warning"`, `"info"`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// An informational message that never affects the verdict.
    Info,
    /// A potential issue that should be reviewed but doesn't fail compilation.
    Warning,
    /// A definite problem that fails compilation.
    Error,
}

impl Severity {
    /// Returns `true` if this severity is [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Classifies a toolchain severity keyword, case-insensitively.
    ///
    /// Accepts `error`, `warning`/`warn`, `info`/`note`, and compiler error
    /// classes such as `ParserError` or `TypeError`, which count as errors.
    /// Error classes must be written in `CamelCase` ending in `Error`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim();
        match keyword.to_ascii_lowercase().as_str() {
            "warning" | "warn" => Some(Severity::Warning),
            "info" | "note" => Some(Severity::Info),
            "error" => Some(Severity::Error),
            _ if is_error_class(keyword) => Some(Severity::Error),
            _ => None,
        }
    }
}

fn is_error_class(keyword: &str) -> bool {
    match keyword.strip_suffix("Error") {
        Some(prefix) => {
            prefix.starts_with(|c: char| c.is_ascii_uppercase())
                && prefix.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
