//! Collection assembly: the one entry point every caller goes through.

use diagnorm_config::{EngineConfig, InfoPolicy};
use diagnorm_diagnostics::{Diagnostic, DiagnosticCollection, Severity};
use tracing::debug;

use crate::dedup::dedup;
use crate::ingest::Input;
use crate::matcher::LineMatcher;
use crate::paths::PathNormalizer;
use crate::payload::Payload;
use crate::suggest::SuggestionEngine;
use crate::verdict::classify;

/// A configured normalization pipeline.
///
/// Holds the compiled noise list, path roots, and suggestion rules so they
/// are built once and reused across compiles. `Normalizer` is `Send + Sync`
/// and can be shared between threads.
pub struct Normalizer {
    matcher: LineMatcher,
    suggestions: SuggestionEngine,
    info: InfoPolicy,
}

impl Normalizer {
    /// Builds a pipeline from a loaded configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            matcher: LineMatcher::new(&config.noise, PathNormalizer::new(&config.paths)),
            suggestions: SuggestionEngine::new(&config.suggest),
            info: config.output.info,
        }
    }

    /// Normalizes one compile result. Never fails.
    pub fn normalize(&self, payload: &Payload) -> DiagnosticCollection {
        self.run(payload, None)
    }

    /// Like [`normalize`](Self::normalize), but location-less diagnostics
    /// are attributed to `file` instead of the unknown placeholder.
    pub fn normalize_for_file(&self, payload: &Payload, file: &str) -> DiagnosticCollection {
        self.run(payload, Some(file))
    }

    /// Returns `(name, description)` for every registered suggestion rule.
    pub fn rules(&self) -> Vec<(&str, &str)> {
        self.suggestions.rules()
    }

    fn run(&self, payload: &Payload, fallback_file: Option<&str>) -> DiagnosticCollection {
        let candidates = match Input::detect(payload) {
            Input::Structured(entries) => entries
                .iter()
                .filter_map(|e| e.to_diagnostic(self.matcher.paths(), fallback_file))
                .collect(),
            Input::RawText(lines) => self.matcher.match_lines(&lines, fallback_file),
        };

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for mut diag in dedup(candidates) {
            if diag.severity == Severity::Info {
                match self.info {
                    InfoPolicy::Drop => {
                        debug!(message = %diag.message, "dropping info diagnostic");
                        continue;
                    }
                    InfoPolicy::Warning => diag.severity = Severity::Warning,
                }
            }
            self.suggestions.enrich(&mut diag);
            bucket_for(&mut errors, &mut warnings, diag.severity).push(diag);
        }

        let verdict = classify(payload.exit_signal(), errors.len(), warnings.len());
        debug!(
            success = verdict.success,
            errors = errors.len(),
            warnings = warnings.len(),
            "normalized compile result"
        );
        DiagnosticCollection::new(verdict.success, verdict.summary_message, errors, warnings)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

fn bucket_for<'a>(
    errors: &'a mut Vec<Diagnostic>,
    warnings: &'a mut Vec<Diagnostic>,
    severity: Severity,
) -> &'a mut Vec<Diagnostic> {
    if severity.is_error() {
        errors
    } else {
        warnings
    }
}

/// Normalizes one compile result with the default configuration.
///
/// Total over its input: malformed or unrecognized content is dropped, and
/// an empty payload yields a successful, empty collection.
pub fn normalize(payload: &Payload) -> DiagnosticCollection {
    Normalizer::default().normalize(payload)
}
