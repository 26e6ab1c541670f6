//! The diagnostic normalization engine.
//!
//! Turns whatever a smart-contract compiler service returned (structured
//! `errors`/`warnings` arrays, raw stdout/stderr text, or both) into one
//! deduplicated, located, suggestion-enriched [`DiagnosticCollection`] with a
//! single success verdict.
//!
//! # Pipeline
//!
//! 1. [`Input::detect`] decides once whether the payload is structured or text
//! 2. [`LineMatcher`] runs the ordered recognizer table over text lines
//! 3. [`dedup`] drops repeated `(file, line, message)` diagnostics
//! 4. [`SuggestionEngine`] appends remediation hints
//! 5. [`classify`] decides the verdict and summary message
//!
//! [`normalize`] runs the whole pipeline with the default configuration and
//! never fails; [`Normalizer`] does the same with a loaded [`EngineConfig`].
//!
//! [`DiagnosticCollection`]: diagnorm_diagnostics::DiagnosticCollection
//! [`EngineConfig`]: diagnorm_config::EngineConfig

#![warn(missing_docs)]

mod dedup;
mod ingest;
mod matcher;
mod normalizer;
mod paths;
mod payload;
mod suggest;
mod verdict;

pub use dedup::dedup;
pub use ingest::{BucketEntry, Input, RawLine};
pub use matcher::{recognize, LineMatch, LineMatcher, PatternFamily};
pub use normalizer::{normalize, Normalizer};
pub use paths::PathNormalizer;
pub use payload::{Entry, Payload, RawEntry};
pub use suggest::{builtin_code_hints, register_builtin_rules, SuggestionEngine, SuggestionRule};
pub use verdict::{classify, Verdict};
