//! The per-compile output contract: verdict plus error and warning buckets.

use crate::diagnostic::Diagnostic;
use serde::Serialize;

/// The normalized result of one compile, as consumed by rendering and
/// persistence code.
///
/// Serialized as `{ success, errors, warnings, message }`. The collection is
/// immutable once built; its fields are only reachable through accessors.
/// Serialization is one-way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticCollection {
    success: bool,
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    #[serde(rename = "message")]
    summary_message: String,
}

impl DiagnosticCollection {
    /// Packages an already-decided verdict with its buckets.
    pub fn new(
        success: bool,
        summary_message: impl Into<String>,
        errors: Vec<Diagnostic>,
        warnings: Vec<Diagnostic>,
    ) -> Self {
        Self {
            success,
            errors,
            warnings,
            summary_message: summary_message.into(),
        }
    }

    /// Returns the overall verdict.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns the error-severity diagnostics in emission order.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Returns the warning-severity diagnostics in emission order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Returns the one-line human-readable status.
    pub fn summary_message(&self) -> &str {
        &self.summary_message
    }

    /// Returns the number of errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Iterates errors first, then warnings.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Returns `true` if neither bucket holds a diagnostic.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}
