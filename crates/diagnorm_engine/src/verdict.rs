//! The single place where the overall compile verdict is decided.

/// The overall outcome of one compile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the compile counts as successful.
    pub success: bool,
    /// One-line human-readable status.
    pub summary_message: String,
}

/// Decides the verdict from the upstream exit signal and the final buckets.
///
/// An explicit signal is necessary but not sufficient: any error vetoes
/// success. Without a signal, success means no errors.
pub fn classify(exit_signal: Option<bool>, error_count: usize, warning_count: usize) -> Verdict {
    let success = error_count == 0 && exit_signal.unwrap_or(true);

    let summary_message = match (success, warning_count) {
        (true, 0) => "Compilation completed".to_string(),
        (true, n) => format!("Compilation completed with {n} warning(s)"),
        (false, _) => format!("Compilation failed with {error_count} error(s)"),
    };

    Verdict {
        success,
        summary_message,
    }
}
