//! Removal of repeated diagnostics, keeping emission order.

use std::collections::HashSet;

use diagnorm_diagnostics::Diagnostic;
use tracing::debug;

/// Drops every diagnostic whose `(file, line, message)` key was already seen.
///
/// The first occurrence wins and the relative order of survivors is the
/// order they were emitted in. Applying `dedup` to its own output is a no-op.
pub fn dedup(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let before = diagnostics.len();
    let mut seen = HashSet::with_capacity(before);
    let unique: Vec<Diagnostic> = diagnostics
        .into_iter()
        .filter(|diag| seen.insert(diag.key()))
        .collect();
    if unique.len() != before {
        debug!(dropped = before - unique.len(), "removed duplicate diagnostics");
    }
    unique
}
