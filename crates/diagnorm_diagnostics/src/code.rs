//! Opaque toolchain diagnostic codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A diagnostic code as reported by the toolchain (e.g. `2314`).
///
/// The code is opaque: no meaning is attached to its contents beyond equality.
/// Diagnostics without a code carry [`DiagnosticCode::UNKNOWN`].
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticCode(String);

impl DiagnosticCode {
    /// The sentinel value used when the toolchain supplied no code.
    pub const UNKNOWN: &'static str = "UNKNOWN";

    /// Creates a code from toolchain text, trimming whitespace and any
    /// surrounding brackets. Blank input yields the unknown code.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw
            .as_ref()
            .trim()
            .trim_start_matches(['[', '('])
            .trim_end_matches([']', ')'])
            .trim();
        if trimmed.is_empty() {
            Self::unknown()
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the unknown-code sentinel.
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    /// Returns `true` if no code was supplied by the toolchain.
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    /// Returns the code text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DiagnosticCode {
    fn default() -> Self {
        Self::unknown()
    }
}

impl From<Option<&str>> for DiagnosticCode {
    fn from(raw: Option<&str>) -> Self {
        raw.map_or_else(Self::unknown, Self::new)
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_brackets() {
        assert_eq!(DiagnosticCode::new("[2314]").as_str(), "2314");
        assert_eq!(DiagnosticCode::new(" (7576) ").as_str(), "7576");
        assert_eq!(DiagnosticCode::new("E0425").as_str(), "E0425");
    }

    #[test]
    fn blank_is_unknown() {
        assert!(DiagnosticCode::new("").is_unknown());
        assert!(DiagnosticCode::new("  []  ").is_unknown());
        assert!(DiagnosticCode::from(None).is_unknown());
        assert!(DiagnosticCode::default().is_unknown());
        assert_eq!(format!("{}", DiagnosticCode::unknown()), "UNKNOWN");
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = DiagnosticCode::new("2314");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"2314\"");
    }
}
