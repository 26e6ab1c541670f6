//! Diagnostic rendering backends for human-readable output.

use crate::collection::DiagnosticCollection;
use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;

    /// Renders every diagnostic of a collection followed by its summary line.
    fn render_collection(&self, collection: &DiagnosticCollection) -> String {
        let mut out = String::new();
        for diag in collection.iter() {
            out.push_str(&self.render(diag));
            out.push('\n');
        }
        out.push_str(collection.summary_message());
        out.push('\n');
        out
    }
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// error[2314]: Expected ';' but got '}'
///   --> Challenge.sol:12:5
///    = help: Add a semicolon at the end of the statement on line 11
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// Whether to append the original compiler text as notes.
    pub show_raw: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool, show_raw: bool) -> Self {
        Self { color, show_raw }
    }

    fn severity_label(&self, severity: Severity) -> String {
        if !self.color {
            return severity.to_string();
        }
        let ansi = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Info => "36",
        };
        format!("\x1b[1;{ansi}m{severity}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        // Header line: severity[CODE]: message
        let label = self.severity_label(diag.severity);
        if diag.code.is_unknown() {
            out.push_str(&format!("{label}: {}\n", diag.message));
        } else {
            out.push_str(&format!("{label}[{}]: {}\n", diag.code, diag.message));
        }

        if diag.has_location() {
            match (diag.line, diag.column) {
                (0, _) => out.push_str(&format!("  --> {}\n", diag.file)),
                (line, 0) => out.push_str(&format!("  --> {}:{line}\n", diag.file)),
                (line, col) => out.push_str(&format!("  --> {}:{line}:{col}\n", diag.file)),
            }
        }

        if self.show_raw {
            for raw in diag.raw_text.lines().filter(|l| !l.trim().is_empty()) {
                out.push_str(&format!("   = note: {}\n", raw.trim_end()));
            }
        }

        for help in &diag.suggestions {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;

    #[test]
    fn render_error_with_location() {
        let diag = Diagnostic::error("Expected ';' but got '}'")
            .with_location("Challenge.sol", 12, 5)
            .with_code(DiagnosticCode::new("2314"))
            .with_suggestion("Add a semicolon");

        let output = TerminalRenderer::new(false, false).render(&diag);

        assert!(output.contains("error[2314]: Expected ';' but got '}'"));
        assert!(output.contains("--> Challenge.sol:12:5"));
        assert!(output.contains("= help: Add a semicolon"));
        assert!(!output.contains("note"));
    }

    #[test]
    fn render_without_location_or_code() {
        let diag = Diagnostic::warning("pre-release compiler");
        let output = TerminalRenderer::new(false, false).render(&diag);
        assert_eq!(output, "warning: pre-release compiler\n");
    }

    #[test]
    fn render_line_without_column() {
        let diag = Diagnostic::error("bad").with_location("A.sol", 4, 0);
        let output = TerminalRenderer::new(false, false).render(&diag);
        assert!(output.contains("--> A.sol:4\n"));
    }

    #[test]
    fn render_raw_text_notes() {
        let diag = Diagnostic::error("Expected ';' but got '}'")
            .with_raw_text("Error (2314): Expected ';' but got '}'\n--> src/A.sol:3:1:");
        let output = TerminalRenderer::new(false, true).render(&diag);
        assert!(output.contains("= note: Error (2314): Expected ';' but got '}'"));
        assert!(output.contains("= note: --> src/A.sol:3:1:"));
    }

    #[test]
    fn render_colored_label() {
        let diag = Diagnostic::error("boom");
        let output = TerminalRenderer::new(true, false).render(&diag);
        assert!(output.starts_with("\x1b[1;31merror\x1b[0m: boom"));
    }

    #[test]
    fn render_collection_ends_with_summary() {
        let collection = DiagnosticCollection::new(
            true,
            "Compilation completed with 1 warning(s)",
            Vec::new(),
            vec![Diagnostic::warning("unused")],
        );
        let output = TerminalRenderer::new(false, false).render_collection(&collection);
        assert_eq!(
            output,
            "warning: unused\n\nCompilation completed with 1 warning(s)\n"
        );
    }
}
