//! Normalized diagnostic records with location, code, and remediation hints.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// The file value used when a diagnostic carried no location.
pub const UNKNOWN_FILE: &str = "unknown";

/// One normalized compiler message.
///
/// Diagnostics are value objects: two diagnostics are the same message when
/// their [`DiagnosticKey`]s are equal. Each diagnostic includes:
/// - A severity and opaque toolchain code
/// - A display path with 1-based line/column (`0` when not provided)
/// - A whitespace-collapsed message and the raw text it came from
/// - Ordered remediation suggestions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// Display path with the source root stripped, or [`UNKNOWN_FILE`].
    pub file: String,
    /// 1-based line number, `0` when not provided.
    pub line: u32,
    /// 1-based column number, `0` when not provided.
    pub column: u32,
    /// The toolchain diagnostic code.
    pub code: DiagnosticCode,
    /// The single-line, whitespace-collapsed message.
    pub message: String,
    /// The original matched line(s), kept for verbose display only.
    #[serde(skip)]
    pub raw_text: String,
    /// Ordered remediation hints.
    pub suggestions: Vec<String>,
}

/// Identity of a diagnostic for deduplication: `(file, line, message)`.
///
/// Column and code are excluded because toolchain sub-passes report the same
/// message with slightly different columns.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DiagnosticKey {
    /// The display path.
    pub file: String,
    /// The line number.
    pub line: u32,
    /// The normalized message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a location-less diagnostic with an unknown code.
    ///
    /// The message is normalized with [`normalize_message`] and also kept
    /// verbatim as the raw text.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        let raw = message.into();
        Self {
            severity,
            file: UNKNOWN_FILE.to_string(),
            line: 0,
            column: 0,
            code: DiagnosticCode::unknown(),
            message: normalize_message(&raw),
            raw_text: raw,
            suggestions: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Sets the location. A blank file becomes [`UNKNOWN_FILE`].
    pub fn with_location(mut self, file: impl Into<String>, line: u32, column: u32) -> Self {
        let file = file.into();
        self.file = if file.trim().is_empty() {
            UNKNOWN_FILE.to_string()
        } else {
            file
        };
        self.line = line;
        self.column = column;
        self
    }

    /// Sets the diagnostic code.
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = code;
        self
    }

    /// Replaces the raw text.
    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = raw_text.into();
        self
    }

    /// Adds a suggestion unless an identical one is already present.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.push_suggestion(suggestion);
        self
    }

    /// Appends a suggestion unless an identical one is already present.
    pub fn push_suggestion(&mut self, suggestion: impl Into<String>) {
        let suggestion = suggestion.into();
        if !self.suggestions.contains(&suggestion) {
            self.suggestions.push(suggestion);
        }
    }

    /// Returns `true` if the toolchain reported a file for this diagnostic.
    pub fn has_location(&self) -> bool {
        self.file != UNKNOWN_FILE
    }

    /// Returns the deduplication key of this diagnostic.
    pub fn key(&self) -> DiagnosticKey {
        DiagnosticKey {
            file: self.file.clone(),
            line: self.line,
            message: self.message.clone(),
        }
    }
}

/// Trims a message and collapses every whitespace run, newlines included,
/// into a single space.
pub fn normalize_message(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_error() {
        let diag = Diagnostic::error("Expected ';' but got '}'");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.file, UNKNOWN_FILE);
        assert_eq!(diag.line, 0);
        assert_eq!(diag.column, 0);
        assert!(diag.code.is_unknown());
        assert!(!diag.has_location());
    }

    #[test]
    fn message_is_collapsed_but_raw_is_kept() {
        let diag = Diagnostic::warning("  unused\n   variable\t'x'  ");
        assert_eq!(diag.message, "unused variable 'x'");
        assert_eq!(diag.raw_text, "  unused\n   variable\t'x'  ");
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::error("undeclared identifier")
            .with_location("Token.sol", 7, 3)
            .with_code(DiagnosticCode::new("7576"))
            .with_suggestion("declare it")
            .with_suggestion("declare it");
        assert_eq!(diag.file, "Token.sol");
        assert_eq!(diag.line, 7);
        assert_eq!(diag.column, 3);
        assert_eq!(diag.code.as_str(), "7576");
        assert_eq!(diag.suggestions, vec!["declare it"]);
        assert!(diag.has_location());
    }

    #[test]
    fn blank_file_is_unknown() {
        let diag = Diagnostic::error("x").with_location("  ", 1, 1);
        assert_eq!(diag.file, UNKNOWN_FILE);
    }

    #[test]
    fn key_ignores_column_and_code() {
        let a = Diagnostic::error("shadowed")
            .with_location("A.sol", 3, 1)
            .with_code(DiagnosticCode::new("2519"));
        let b = Diagnostic::error("shadowed").with_location("A.sol", 3, 9);
        assert_eq!(a.key(), b.key());

        let c = Diagnostic::error("shadowed").with_location("A.sol", 4, 1);
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn serialized_shape() {
        let diag = Diagnostic::warning("unused")
            .with_location("A.sol", 3, 1)
            .with_raw_text("src/A.sol:3:1: Warning: unused");
        let value = serde_json::to_value(&diag).unwrap();
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["file"], "A.sol");
        assert_eq!(value["line"], 3);
        assert_eq!(value["column"], 1);
        assert_eq!(value["code"], "UNKNOWN");
        assert_eq!(value["message"], "unused");
        assert!(value["suggestions"].as_array().unwrap().is_empty());
        assert!(value.get("raw_text").is_none());
    }
}
