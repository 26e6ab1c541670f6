//! The ordered recognizer table for textual toolchain diagnostics.
//!
//! Each line is tried against the recognizers in priority order and the first
//! match wins, so the most specific, most information-bearing format always
//! claims a line before a looser one can:
//!
//! | Family              | Shape                                          |
//! |---------------------|------------------------------------------------|
//! | `LocatedWithCode`   | `path:line:col: Severity [code]: message`      |
//! | `CodeThenLocation`  | `Severity [code] (path:line:col): message`     |
//! | `Located`           | `path:line[:col]: Severity: message`           |
//! | `Bare`              | `Severity[ (code)]: message`                   |
//!
//! A line claimed by one of the located families is always kept. Any other
//! line is checked against the noise list (e.g. `Compiler run failed`)
//! before the bare family may claim it; unmatched lines are dropped.
//!
//! Paths may carry a Windows drive letter (`C:\work\A.sol`). A leading
//! `HH:MM:SS` timestamp is skipped before matching. Compiler error classes
//! are only recognized in their `CamelCaseError` form (`TypeError`).

use std::sync::LazyLock;

use diagnorm_config::NoiseConfig;
use diagnorm_diagnostics::{Diagnostic, DiagnosticCode, Severity, UNKNOWN_FILE};
use regex::{Captures, Regex};
use tracing::debug;

use crate::ingest::RawLine;
use crate::paths::PathNormalizer;

/// The recognized textual diagnostic formats, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternFamily {
    /// `path:line:col: Severity [code]: message`
    LocatedWithCode,
    /// `Severity [code] (path:line:col): message`
    CodeThenLocation,
    /// `path:line[:col]: Severity: message`
    Located,
    /// `Severity[ (code)]: message`, no location.
    Bare,
}

/// The fields extracted from one recognized line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineMatch {
    /// The recognizer that claimed the line.
    pub family: PatternFamily,
    /// The classified severity keyword.
    pub severity: Severity,
    /// The reported path, before normalization.
    pub file: Option<String>,
    /// 1-based line, `0` when absent.
    pub line: u32,
    /// 1-based column, `0` when absent.
    pub column: u32,
    /// The reported code, if any.
    pub code: Option<String>,
    /// The message text.
    pub message: String,
}

struct Recognizer {
    family: PatternFamily,
    regex: Regex,
}

const SEVERITY: &str = r"(?P<sev>(?i:error|warning|warn|info|note)|[A-Z][a-zA-Z]*Error)";
const PATH: &str = r"(?P<file>(?:[A-Za-z]:[\\/])?[^\s:][^:]*?)";

static RECOGNIZERS: LazyLock<Vec<Recognizer>> = LazyLock::new(|| {
    let table = [
        (
            PatternFamily::LocatedWithCode,
            format!(
                r"^{PATH}:(?P<line>\d+):(?P<col>\d+):\s*{SEVERITY}\s*\[(?P<code>[^\]]*)\]\s*:\s*(?P<msg>.+)$"
            ),
        ),
        (
            PatternFamily::CodeThenLocation,
            format!(
                r"^{SEVERITY}\s*\[(?P<code>[^\]]*)\]\s*\((?P<file>(?:[A-Za-z]:[\\/])?[^():]+):(?P<line>\d+):(?P<col>\d+)\)\s*:\s*(?P<msg>.+)$"
            ),
        ),
        (
            PatternFamily::Located,
            format!(r"^{PATH}:(?P<line>\d+)(?::(?P<col>\d+))?:\s*{SEVERITY}\s*:\s*(?P<msg>.+)$"),
        ),
        (
            PatternFamily::Bare,
            format!(r"^{SEVERITY}(?:\s*[\[(](?P<code>[^\])]*)[\])])?\s*:\s*(?P<msg>.+)$"),
        ),
    ];
    table
        .into_iter()
        .map(|(family, pattern)| Recognizer {
            family,
            regex: Regex::new(&pattern).expect("static regex must compile"),
        })
        .collect()
});

/// `--> path:line:col:` as printed under a bare solc diagnostic.
static LOCATION_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^-->\s*{PATH}:(?P<line>\d+)(?::(?P<col>\d+))?:?\s*$"))
        .expect("static regex must compile")
});

/// Source excerpt lines: `|`, `12 |     }`, `^^^^`.
static EXCERPT_GUTTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+\s*)?\|.*$|^\^+$").expect("static regex must compile")
});

/// `12:30:45 `, `[12:30:45.120] ` and similar clock prefixes.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[?\d{1,2}:\d{2}:\d{2}(?:[.,]\d+)?\]?:?\s+")
        .expect("static regex must compile")
});

/// Tries every recognizer in priority order against one trimmed line.
pub fn recognize(line: &str) -> Option<LineMatch> {
    let line = TIMESTAMP.find(line).map_or(line, |ts| &line[ts.end()..]);
    RECOGNIZERS.iter().find_map(|recognizer| {
        let caps = recognizer.regex.captures(line)?;
        if caps
            .name("file")
            .is_some_and(|f| f.as_str().bytes().all(|b| b.is_ascii_digit()))
        {
            return None;
        }
        let severity = Severity::from_keyword(&caps["sev"])?;
        Some(LineMatch {
            family: recognizer.family,
            severity,
            file: caps.name("file").map(|m| m.as_str().to_string()),
            line: number(&caps, "line"),
            column: number(&caps, "col"),
            code: caps
                .name("code")
                .map(|m| m.as_str().trim().to_string())
                .filter(|c| !c.is_empty()),
            message: caps["msg"].trim().to_string(),
        })
    })
}

fn number(caps: &Captures<'_>, name: &str) -> u32 {
    caps.name(name)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Turns raw text lines into candidate diagnostics.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    noise: Vec<String>,
    paths: PathNormalizer,
}

impl LineMatcher {
    /// Creates a matcher from the noise configuration and path normalizer.
    pub fn new(noise: &NoiseConfig, paths: PathNormalizer) -> Self {
        Self {
            noise: noise
                .patterns
                .iter()
                .map(|p| p.trim().to_lowercase())
                .collect(),
            paths,
        }
    }

    /// Returns the path normalizer shared with the structured branch.
    pub fn paths(&self) -> &PathNormalizer {
        &self.paths
    }

    /// Returns `true` if the line is known non-diagnostic chatter.
    pub fn is_noise(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.noise.iter().any(|pattern| lower.contains(pattern.as_str()))
    }

    /// Matches every line, in order, producing candidate diagnostics.
    ///
    /// Lines with a location are never treated as noise; everything else is
    /// checked against the noise list first.
    ///
    /// A bare match immediately followed by a `-->` location line takes its
    /// location from that line; the arrow and any source-excerpt lines after
    /// it are folded into the diagnostic's raw text. Location-less
    /// diagnostics use `fallback_file` when given.
    pub fn match_lines(&self, lines: &[RawLine], fallback_file: Option<&str>) -> Vec<Diagnostic> {
        let fallback = fallback_file
            .map(|f| self.paths.normalize(f))
            .unwrap_or_else(|| UNKNOWN_FILE.to_string());
        let mut diagnostics = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            i += 1;

            let found = recognize(&line.text);
            let located = found
                .as_ref()
                .is_some_and(|m| m.family != PatternFamily::Bare);
            if !located && self.is_noise(&line.text) {
                debug!(line = %line.text, "discarding noise line");
                continue;
            }

            let Some(found) = found else {
                if let Some(hint) = line.hint {
                    diagnostics.push(
                        Diagnostic::new(hint, line.text.as_str())
                            .with_location(fallback.as_str(), 0, 0),
                    );
                } else {
                    debug!(line = %line.text, "dropping unrecognized line");
                }
                continue;
            };

            let mut raw_text = line.text.clone();
            let mut location = found
                .file
                .as_deref()
                .map(|f| (self.paths.normalize(f), found.line, found.column));

            if found.family == PatternFamily::Bare {
                let arrow = lines
                    .get(i)
                    .and_then(|next| LOCATION_ARROW.captures(&next.text));
                if let Some(caps) = arrow {
                    location = Some((
                        self.paths.normalize(&caps["file"]),
                        number(&caps, "line"),
                        number(&caps, "col"),
                    ));
                    raw_text.push('\n');
                    raw_text.push_str(&lines[i].text);
                    i += 1;
                    while let Some(gutter) = lines
                        .get(i)
                        .filter(|l| EXCERPT_GUTTER.is_match(&l.text))
                    {
                        raw_text.push('\n');
                        raw_text.push_str(&gutter.text);
                        i += 1;
                    }
                }
            }

            let (file, line_no, column) = location.unwrap_or_else(|| (fallback.clone(), 0, 0));
            diagnostics.push(
                Diagnostic::new(found.severity, found.message)
                    .with_location(file, line_no, column)
                    .with_code(DiagnosticCode::from(found.code.as_deref()))
                    .with_raw_text(raw_text),
            );
        }

        diagnostics
    }
}

impl Default for LineMatcher {
    fn default() -> Self {
        Self::new(&NoiseConfig::default(), PathNormalizer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<RawLine> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(RawLine::new)
            .collect()
    }

    #[test]
    fn located_with_code() {
        let m = recognize("src/Token.sol:7:3: Error [7576]: Undeclared identifier.").unwrap();
        assert_eq!(m.family, PatternFamily::LocatedWithCode);
        assert_eq!(m.severity, Severity::Error);
        assert_eq!(m.file.as_deref(), Some("src/Token.sol"));
        assert_eq!((m.line, m.column), (7, 3));
        assert_eq!(m.code.as_deref(), Some("7576"));
        assert_eq!(m.message, "Undeclared identifier.");
    }

    #[test]
    fn code_then_location() {
        let m = recognize("Warning [2072] (src/A.sol:3:9): Unused local variable.").unwrap();
        assert_eq!(m.family, PatternFamily::CodeThenLocation);
        assert_eq!(m.severity, Severity::Warning);
        assert_eq!(m.file.as_deref(), Some("src/A.sol"));
        assert_eq!((m.line, m.column), (3, 9));
        assert_eq!(m.code.as_deref(), Some("2072"));
    }

    #[test]
    fn located_without_code() {
        let m = recognize("src/Challenge.sol:12:5: Error: Expected ';' but got '}'").unwrap();
        assert_eq!(m.family, PatternFamily::Located);
        assert_eq!(m.file.as_deref(), Some("src/Challenge.sol"));
        assert_eq!((m.line, m.column), (12, 5));
        assert_eq!(m.code, None);
        assert_eq!(m.message, "Expected ';' but got '}'");
    }

    #[test]
    fn located_without_column() {
        let m = recognize("src/A.sol:4: warning: shadowing").unwrap();
        assert_eq!(m.family, PatternFamily::Located);
        assert_eq!((m.line, m.column), (4, 0));
    }

    #[test]
    fn located_with_error_class() {
        let m = recognize("src/A.sol:4:1: TypeError: Type uint256 is not implicitly convertible")
            .unwrap();
        assert_eq!(m.family, PatternFamily::Located);
        assert_eq!(m.severity, Severity::Error);
    }

    #[test]
    fn bare_forms() {
        let m = recognize("Error: Source file requires different compiler version").unwrap();
        assert_eq!(m.family, PatternFamily::Bare);
        assert_eq!(m.file, None);
        assert_eq!((m.line, m.column), (0, 0));

        let m = recognize("Error (2314): Expected ';' but got '}'").unwrap();
        assert_eq!(m.family, PatternFamily::Bare);
        assert_eq!(m.code.as_deref(), Some("2314"));
        assert_eq!(m.message, "Expected ';' but got '}'");

        let m = recognize("ParserError: Expected pragma, import directive or contract").unwrap();
        assert_eq!(m.severity, Severity::Error);

        let m = recognize("Note: The shadowed declaration is here").unwrap();
        assert_eq!(m.severity, Severity::Info);
    }

    #[test]
    fn unrecognized_lines() {
        assert!(recognize("Compiling 3 files with 0.8.19").is_none());
        assert!(recognize("Solc 0.8.19 finished in 1.02s").is_none());
        assert!(recognize("12 |     }").is_none());
        assert!(recognize("Failure: something odd").is_none());
    }

    #[test]
    fn noise_is_discarded_even_when_keyword_led() {
        let matcher = LineMatcher::default();
        assert!(matcher.is_noise("Error: Compiler run failed:"));
        let text = "Compiler run failed\nError: Compiler run failed";
        let out = matcher.match_lines(&lines(text), None);
        assert!(out.is_empty());
    }

    #[test]
    fn unrecognized_lines_are_dropped() {
        let matcher = LineMatcher::default();
        let text = "Compiling 1 files with 0.8.19\nsrc/A.sol:3:1: Warning: unused\ntrailing junk";
        let out = matcher.match_lines(&lines(text), None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].file, "A.sol");
        assert_eq!(out[0].raw_text, "src/A.sol:3:1: Warning: unused");
    }

    #[test]
    fn bare_match_uses_fallback_file() {
        let matcher = LineMatcher::default();
        let text = lines("Warning: pre-release compiler");
        let out = matcher.match_lines(&text, Some("src/Challenge.sol"));
        assert_eq!(out[0].file, "Challenge.sol");
        assert_eq!((out[0].line, out[0].column), (0, 0));

        let out = matcher.match_lines(&text, None);
        assert_eq!(out[0].file, UNKNOWN_FILE);
    }

    #[test]
    fn multi_line_block_takes_arrow_location() {
        let text = "
Error (2314): Expected ';' but got '}'
 --> src/Challenge.sol:12:5:
   |
12 |     }
   |     ^
Warning: something else
";
        let out = LineMatcher::default().match_lines(&lines(text), None);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].file, "Challenge.sol");
        assert_eq!((out[0].line, out[0].column), (12, 5));
        assert_eq!(out[0].code.as_str(), "2314");
        assert_eq!(out[0].message, "Expected ';' but got '}'");
        assert_eq!(out[0].raw_text.lines().count(), 5);
        assert!(out[0].raw_text.starts_with("Error (2314)"));
        assert_eq!(out[1].severity, Severity::Warning);
    }

    #[test]
    fn hinted_unrecognized_line_keeps_bucket_severity() {
        let matcher = LineMatcher::default();
        let line = RawLine {
            text: "stack too deep".to_string(),
            hint: Some(Severity::Error),
        };
        let out = matcher.match_lines(&[line], None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].severity, Severity::Error);
        assert_eq!(out[0].message, "stack too deep");
        assert_eq!(out[0].file, UNKNOWN_FILE);
    }

    #[test]
    fn hinted_noise_is_still_noise() {
        let line = RawLine {
            text: "Compiler run failed".to_string(),
            hint: Some(Severity::Error),
        };
        assert!(LineMatcher::default().match_lines(&[line], None).is_empty());
    }

    #[test]
    fn custom_noise_patterns() {
        let noise = NoiseConfig {
            patterns: vec!["NOTHING TO COMPILE".to_string()],
        };
        let matcher = LineMatcher::new(&noise, PathNormalizer::default());
        assert!(matcher.is_noise("Warning: nothing to compile"));
        assert!(!matcher.is_noise("Compiler run failed"));
    }

    #[test]
    fn located_line_with_noise_text_is_kept() {
        let matcher = LineMatcher::default();
        let text = "src/A.sol:3:1: Error: Compilation failed: stack too deep\n\
                    Error: Compilation failed";
        let out = matcher.match_lines(&lines(text), None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].severity, Severity::Error);
        assert_eq!((out[0].file.as_str(), out[0].line), ("A.sol", 3));
        assert_eq!(out[0].message, "Compilation failed: stack too deep");
    }

    #[test]
    fn windows_drive_paths() {
        let m = recognize(r"C:\work\src\A.sol:3:1: Error: boom").unwrap();
        assert_eq!(m.family, PatternFamily::Located);
        assert_eq!(m.file.as_deref(), Some(r"C:\work\src\A.sol"));
        assert_eq!((m.line, m.column), (3, 1));

        let m = recognize(r"Error [2314] (D:/proj/contracts/B.sol:5:2): oops").unwrap();
        assert_eq!(m.family, PatternFamily::CodeThenLocation);
        assert_eq!(m.file.as_deref(), Some("D:/proj/contracts/B.sol"));

        let text = lines(r"C:\work\src\A.sol:3:1: Error: boom");
        let out = LineMatcher::default().match_lines(&text, None);
        assert_eq!(out[0].file, "A.sol");
    }

    #[test]
    fn timestamp_prefix_is_not_a_path() {
        let m = recognize("12:30:45: Error: boom").unwrap();
        assert_eq!(m.family, PatternFamily::Bare);
        assert_eq!(m.file, None);
        assert_eq!(m.message, "boom");

        let m = recognize("[09:15:02.331] src/A.sol:4:2: Warning: late").unwrap();
        assert_eq!(m.file.as_deref(), Some("src/A.sol"));
        assert_eq!((m.line, m.column), (4, 2));

        assert!(recognize("12:30: Error: boom").is_none());
    }

    #[test]
    fn error_classes_must_be_camel_case() {
        assert!(recognize("Terror: boom").is_none());
        assert!(recognize("src/A.sol:1:1: mirror: boom").is_none());
        let m = recognize("DeclarationError: Identifier already declared.").unwrap();
        assert_eq!(m.severity, Severity::Error);
    }
}
