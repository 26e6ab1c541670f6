//! Fixed hints for well-known toolchain diagnostic codes.

use std::collections::BTreeMap;

use diagnorm_diagnostics::Diagnostic;

use super::SuggestionRule;

/// Built-in `(code, hint)` pairs for common solc diagnostics.
pub fn builtin_code_hints() -> &'static [(&'static str, &'static str)] {
    &[
        (
            "1878",
            "Add an SPDX license comment at the top of the file, e.g. // SPDX-License-Identifier: MIT",
        ),
        (
            "2018",
            "Restrict the function's state mutability to view or pure",
        ),
        ("2072", "Remove the unused local variable or use it"),
        (
            "2314",
            "Check for a missing or misplaced token such as a semicolon or closing bracket",
        ),
        (
            "3420",
            "Add a pragma directive for the compiler version, e.g. pragma solidity ^0.8.0;",
        ),
        (
            "4937",
            "Add a visibility specifier such as public or external to the function",
        ),
        (
            "5667",
            "Remove or comment out the name of the unused function parameter",
        ),
        ("6275", "Check the import path; the imported source file was not found"),
        ("7576", "Declare the identifier or correct its spelling"),
        ("9574", "Convert the value explicitly to the expected type"),
    ]
}

/// Looks up the diagnostic code in the built-in table plus configured extras.
pub struct KnownCode {
    hints: BTreeMap<String, String>,
}

impl KnownCode {
    /// Creates the lookup table; `extra` entries override built-in ones.
    pub fn new(extra: &BTreeMap<String, String>) -> Self {
        let mut hints: BTreeMap<String, String> = builtin_code_hints()
            .iter()
            .map(|(code, hint)| (code.to_string(), hint.to_string()))
            .collect();
        for (code, hint) in extra {
            hints.insert(code.trim().to_string(), hint.clone());
        }
        Self { hints }
    }
}

impl SuggestionRule for KnownCode {
    fn name(&self) -> &str {
        "known-code"
    }

    fn description(&self) -> &str {
        "Diagnostic code has a fixed hint in the code table"
    }

    fn suggest(&self, diag: &Diagnostic, _message: &str, out: &mut Vec<String>) {
        if let Some(hint) = self.hints.get(diag.code.as_str()) {
            out.push(hint.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagnorm_diagnostics::DiagnosticCode;

    fn hints_for(rule: &KnownCode, code: &str) -> Vec<String> {
        let diag = Diagnostic::error("anything").with_code(DiagnosticCode::new(code));
        let mut out = Vec::new();
        rule.suggest(&diag, "anything", &mut out);
        out
    }

    #[test]
    fn builtin_codes() {
        let rule = KnownCode::new(&BTreeMap::new());
        assert_eq!(hints_for(&rule, "7576").len(), 1);
        assert!(hints_for(&rule, "UNKNOWN").is_empty());
        assert!(hints_for(&rule, "0000").is_empty());
    }

    #[test]
    fn builtin_table_has_unique_codes() {
        let table = builtin_code_hints();
        let codes: std::collections::HashSet<&str> = table.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes.len(), table.len());
    }

    #[test]
    fn extra_codes_extend_and_override() {
        let mut extra = BTreeMap::new();
        extra.insert("9582".to_string(), "Check the member name".to_string());
        extra.insert(" 7576 ".to_string(), "Custom undeclared hint".to_string());
        let rule = KnownCode::new(&extra);
        assert_eq!(hints_for(&rule, "9582"), vec!["Check the member name"]);
        assert_eq!(hints_for(&rule, "7576"), vec!["Custom undeclared hint"]);
    }
}
