//! Shape detection: structured entries versus raw toolchain text.

use crate::paths::PathNormalizer;
use crate::payload::{Entry, Payload, RawEntry};
use diagnorm_diagnostics::{Diagnostic, DiagnosticCode, Severity, UNKNOWN_FILE};
use tracing::debug;

/// The payload reduced to a single shape, decided once per call.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Structured entries from the `errors`/`warnings` arrays.
    Structured(Vec<BucketEntry>),
    /// Trimmed, non-empty text lines.
    RawText(Vec<RawLine>),
}

/// A structured entry together with the bucket it arrived in.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketEntry {
    /// Severity implied by the bucket (`errors` or `warnings`).
    pub bucket: Severity,
    /// The entry as sent.
    pub entry: Entry,
}

/// One trimmed line of toolchain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// The trimmed line.
    pub text: String,
    /// Severity of the bucket this line came from, for lines taken from a
    /// string element of `errors`/`warnings`.
    pub hint: Option<Severity>,
}

impl RawLine {
    /// Creates a line with no bucket hint.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hint: None,
        }
    }
}

impl Input {
    /// Decides the payload's shape.
    ///
    /// Structured entries take precedence whenever there is at least one;
    /// text is consulted only when there is none. The `output`, `stdout`,
    /// and `stderr` blobs are read first. String elements of `errors` and
    /// `warnings` are a fallback, read only when the blobs hold no line.
    pub fn detect(payload: &Payload) -> Self {
        let structured: Vec<BucketEntry> = bucketed(payload)
            .filter_map(|(bucket, raw)| match raw {
                RawEntry::Structured(entry) => Some(BucketEntry {
                    bucket,
                    entry: entry.clone(),
                }),
                RawEntry::Text(_) => None,
            })
            .collect();
        if !structured.is_empty() {
            debug!(entries = structured.len(), "structured payload");
            return Input::Structured(structured);
        }

        let mut lines = Vec::new();
        for blob in [&payload.output, &payload.stdout, &payload.stderr]
            .into_iter()
            .flatten()
        {
            push_lines(&mut lines, blob, None);
        }
        if lines.is_empty() {
            for (bucket, raw) in bucketed(payload) {
                if let RawEntry::Text(text) = raw {
                    push_lines(&mut lines, text, Some(bucket));
                }
            }
        }
        debug!(lines = lines.len(), "raw text payload");
        Input::RawText(lines)
    }

    /// Returns `true` if there is nothing to normalize.
    pub fn is_empty(&self) -> bool {
        match self {
            Input::Structured(entries) => entries.is_empty(),
            Input::RawText(lines) => lines.is_empty(),
        }
    }
}

impl BucketEntry {
    /// Converts the entry into a diagnostic.
    ///
    /// The entry's own severity (or compiler error class) wins over the
    /// bucket. Entries without any message text yield `None`.
    pub fn to_diagnostic(
        &self,
        paths: &PathNormalizer,
        fallback_file: Option<&str>,
    ) -> Option<Diagnostic> {
        let Some(text) = self.entry.text() else {
            debug!("skipping structured entry without a message");
            return None;
        };
        let severity = [&self.entry.severity, &self.entry.kind]
            .into_iter()
            .flatten()
            .find_map(|keyword| Severity::from_keyword(keyword))
            .unwrap_or(self.bucket);

        let file = self
            .entry
            .file
            .as_deref()
            .or(fallback_file)
            .map_or_else(|| UNKNOWN_FILE.to_string(), |f| paths.normalize(f));

        Some(
            Diagnostic::new(severity, text)
                .with_location(
                    file,
                    self.entry.line.unwrap_or(0),
                    self.entry.column.unwrap_or(0),
                )
                .with_code(DiagnosticCode::from(self.entry.code.as_deref())),
        )
    }
}

fn bucketed(payload: &Payload) -> impl Iterator<Item = (Severity, &RawEntry)> {
    let errors = payload.errors.iter().map(|e| (Severity::Error, e));
    let warnings = payload.warnings.iter().map(|e| (Severity::Warning, e));
    errors.chain(warnings)
}

fn push_lines(lines: &mut Vec<RawLine>, blob: &str, hint: Option<Severity>) {
    lines.extend(
        blob.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| RawLine {
                text: line.to_string(),
                hint,
            }),
    );
}
