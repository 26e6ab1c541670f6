//! Built-in message-pattern suggestion rules.

use diagnorm_diagnostics::Diagnostic;

use super::{line_phrase, SuggestionRule};

/// "Expected X but got Y" parser errors.
pub struct ExpectedToken;

impl SuggestionRule for ExpectedToken {
    fn name(&self) -> &str {
        "expected-token"
    }

    fn description(&self) -> &str {
        "Parser expected a different token ('expected ... but got ...')"
    }

    fn suggest(&self, diag: &Diagnostic, message: &str, out: &mut Vec<String>) {
        if message.contains("expected") && message.contains("but got") {
            out.push(format!(
                "The compiler found an unexpected token at {}; check the code just before it",
                line_phrase(diag)
            ));
            out.push(
                "Look for a missing semicolon or an unclosed bracket on the previous statement"
                    .to_string(),
            );
        }
    }
}

/// Missing `;` terminators.
pub struct MissingSemicolon;

impl SuggestionRule for MissingSemicolon {
    fn name(&self) -> &str {
        "missing-semicolon"
    }

    fn description(&self) -> &str {
        "Message mentions a semicolon or a ';' token"
    }

    fn suggest(&self, diag: &Diagnostic, message: &str, out: &mut Vec<String>) {
        if message.contains("semicolon") || message.contains("';'") {
            let at = if diag.line > 1 {
                format!("on line {} or the line before it", diag.line)
            } else {
                format!("on {}", line_phrase(diag))
            };
            out.push(format!("Add a semicolon (;) at the end of the statement {at}"));
        }
    }
}

/// Unbalanced brackets, braces, and parentheses.
pub struct UnmatchedDelimiter;

const QUOTED_DELIMITERS: [&str; 6] = ["'{'", "'}'", "'('", "')'", "'['", "']'"];

impl SuggestionRule for UnmatchedDelimiter {
    fn name(&self) -> &str {
        "unmatched-delimiter"
    }

    fn description(&self) -> &str {
        "Message mentions a bracket, brace, parenthesis, or a quoted delimiter token"
    }

    fn suggest(&self, _diag: &Diagnostic, message: &str, out: &mut Vec<String>) {
        let mentions = ["bracket", "brace", "parenthes"]
            .iter()
            .any(|word| message.contains(word))
            || QUOTED_DELIMITERS.iter().any(|token| message.contains(token));
        if mentions {
            out.push(
                "Make sure every opening bracket, brace, or parenthesis has a matching closing one"
                    .to_string(),
            );
        }
    }
}

/// Type conversion and compatibility errors.
pub struct TypeMismatch;

impl SuggestionRule for TypeMismatch {
    fn name(&self) -> &str {
        "type-mismatch"
    }

    fn description(&self) -> &str {
        "Message mentions a type and a negation ('type ... not ...')"
    }

    fn suggest(&self, _diag: &Diagnostic, message: &str, out: &mut Vec<String>) {
        if message.contains("type") && message.contains("not") {
            out.push(
                "Check that the value's type matches the expected type; an explicit conversion may be needed"
                    .to_string(),
            );
        }
    }
}

/// Names that are used without being declared.
pub struct UndeclaredIdentifier;

impl SuggestionRule for UndeclaredIdentifier {
    fn name(&self) -> &str {
        "undeclared-identifier"
    }

    fn description(&self) -> &str {
        "Message says something was not found, undefined, or undeclared"
    }

    fn suggest(&self, _diag: &Diagnostic, message: &str, out: &mut Vec<String>) {
        if ["not found", "undefined", "undeclared"]
            .iter()
            .any(|word| message.contains(word))
        {
            out.push("Make sure the identifier is declared before use and spelled correctly".to_string());
            out.push("If it is defined in another file, check the import statement".to_string());
        }
    }
}

/// Functions declared without `public`/`external`/`internal`/`private`.
pub struct MissingVisibility;

impl SuggestionRule for MissingVisibility {
    fn name(&self) -> &str {
        "missing-visibility"
    }

    fn description(&self) -> &str {
        "Message mentions visibility"
    }

    fn suggest(&self, _diag: &Diagnostic, message: &str, out: &mut Vec<String>) {
        if message.contains("visibility") {
            out.push(
                "Add a visibility specifier (public, external, internal, or private) to the declaration"
                    .to_string(),
            );
        }
    }
}
