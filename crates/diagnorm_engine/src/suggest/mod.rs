//! Heuristic remediation hints attached to diagnostics.
//!
//! The `SuggestionEngine` owns an ordered list of [`SuggestionRule`]s. Every
//! enabled rule sees every eligible diagnostic and may add hints; rules are
//! additive and always run in registration order, so hint lists are
//! reproducible. Errors that no rule fires for get the generic fallback hints.

mod codes;
mod rules;

pub use codes::{builtin_code_hints, KnownCode};
pub use rules::{
    ExpectedToken, MissingSemicolon, MissingVisibility, TypeMismatch, UndeclaredIdentifier,
    UnmatchedDelimiter,
};

use std::collections::HashSet;

use diagnorm_config::SuggestConfig;
use diagnorm_diagnostics::{Diagnostic, Severity};
use tracing::warn;

/// A single rule mapping diagnostic content to remediation hints.
pub trait SuggestionRule: Send + Sync {
    /// Returns the short kebab-case name of this rule (e.g. "missing-semicolon").
    fn name(&self) -> &str;

    /// Returns a human-readable description of when this rule fires.
    fn description(&self) -> &str;

    /// Appends hints for `diag`. `message` is the lowercased message.
    fn suggest(&self, diag: &Diagnostic, message: &str, out: &mut Vec<String>);
}

/// Runs suggestion rules over diagnostics.
pub struct SuggestionEngine {
    rules: Vec<Box<dyn SuggestionRule>>,
    disabled: HashSet<String>,
    warnings: bool,
    toolchain: String,
}

impl SuggestionEngine {
    /// Creates an engine configured by the `[suggest]` section.
    ///
    /// All built-in rules are registered; names listed in `disabled` are
    /// skipped at run time. Unknown names are reported and ignored.
    pub fn new(config: &SuggestConfig) -> Self {
        let mut engine = Self {
            rules: Vec::new(),
            disabled: config.disabled.iter().cloned().collect(),
            warnings: config.warnings,
            toolchain: config.toolchain.clone(),
        };
        register_builtin_rules(&mut engine, config);

        for name in &config.disabled {
            if !engine.rules.iter().any(|r| r.name() == name) {
                warn!(rule = %name, "ignoring unknown suggestion rule in suggest.disabled");
            }
        }
        engine
    }

    /// Registers a rule after the ones already present.
    pub fn register(&mut self, rule: Box<dyn SuggestionRule>) {
        self.rules.push(rule);
    }

    /// Returns `(name, description)` for every registered rule, in order.
    pub fn rules(&self) -> Vec<(&str, &str)> {
        self.rules
            .iter()
            .map(|r| (r.name(), r.description()))
            .collect()
    }

    /// Returns `true` if the named rule is registered and not disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.contains(name) && self.rules.iter().any(|r| r.name() == name)
    }

    /// Appends hints to one diagnostic.
    ///
    /// Errors always end up with at least one hint. Warnings receive rule
    /// hints only when enabled in the configuration; info diagnostics none.
    pub fn enrich(&self, diag: &mut Diagnostic) {
        let eligible = match diag.severity {
            Severity::Error => true,
            Severity::Warning => self.warnings,
            Severity::Info => false,
        };
        if !eligible {
            return;
        }

        let message = diag.message.to_lowercase();
        let mut hints = Vec::new();
        for rule in &self.rules {
            if self.disabled.contains(rule.name()) {
                continue;
            }
            rule.suggest(diag, &message, &mut hints);
        }

        if hints.is_empty() && diag.severity.is_error() {
            hints.extend(self.fallback_hints(diag));
        }
        for hint in hints {
            diag.push_suggestion(hint);
        }
    }

    fn fallback_hints(&self, diag: &Diagnostic) -> [String; 2] {
        let syntax = if diag.line > 0 {
            format!("Check the syntax around line {}", diag.line)
        } else {
            "Check the syntax of the reported statement".to_string()
        };
        [
            syntax,
            format!("Review the {} documentation for proper syntax", self.toolchain),
        ]
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(&SuggestConfig::default())
    }
}

/// Registers the built-in rules in their fixed evaluation order.
///
/// Message-pattern rules come first, then the code lookup table extended by
/// `config.codes`.
pub fn register_builtin_rules(engine: &mut SuggestionEngine, config: &SuggestConfig) {
    engine.register(Box::new(ExpectedToken));
    engine.register(Box::new(MissingSemicolon));
    engine.register(Box::new(UnmatchedDelimiter));
    engine.register(Box::new(TypeMismatch));
    engine.register(Box::new(UndeclaredIdentifier));
    engine.register(Box::new(MissingVisibility));
    engine.register(Box::new(KnownCode::new(&config.codes)));
}

/// Describes a diagnostic's line for use inside a hint.
fn line_phrase(diag: &Diagnostic) -> String {
    if diag.line > 0 {
        format!("line {}", diag.line)
    } else {
        "the reported line".to_string()
    }
}
