//! Invariants that hold for every collection `normalize` produces.
//!
//! Each property is checked over a fixed corpus covering both input shapes,
//! noise, duplicates, and explicit exit signals.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use diagnorm_diagnostics::{Diagnostic, DiagnosticCollection, Severity};
use diagnorm_engine::{dedup, normalize, Entry, Normalizer, Payload};

fn corpus() -> Vec<Payload> {
    vec![
        Payload::default(),
        Payload::from_output("Compiler run failed"),
        Payload::from_output("src/A.sol:3:1: Warning: unused variable 'x'\nsrc/A.sol:3:1: Warning: unused variable 'x'"),
        Payload::from_output("src/Challenge.sol:12:5: Error: Expected ';' but got '}'"),
        Payload::from_output(
            "Error (7576): Undeclared identifier.\n --> src/A.sol:4:9:\n  |\n4 | foo();\n  | ^^^",
        ),
        Payload::from_output("src/A.sol:1:1: Error: x\nsrc/A.sol:1:9: Error: x\nsrc/A.sol:2:1: Error: x")
            .with_success(true),
        Payload::from_output("nothing recognizable here").with_exit_code(2),
        Payload::default()
            .with_success(true)
            .with_error(Entry::new("Stack too deep").at("src/B.sol", 8, 1)),
        Payload::default()
            .with_success(false)
            .with_warning(Entry::new("Function state mutability can be restricted to pure").with_code("2018")),
        Payload::from_text(r#"{"errors": ["Error: raw error text"], "warnings": ["plain warning text"]}"#),
        Payload::from_text("{ this is not json"),
    ]
}

fn without_signal(payload: &Payload) -> bool {
    payload.exit_signal().is_none()
}

#[test]
fn dedup_is_idempotent() {
    let mut raw: Vec<Diagnostic> = Vec::new();
    for payload in corpus() {
        let result = normalize(&payload);
        raw.extend(result.iter().cloned());
        raw.extend(result.iter().cloned());
    }
    let once = dedup(raw);
    let twice = dedup(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn buckets_are_disjoint() {
    for payload in corpus() {
        let result = normalize(&payload);
        let errors: HashSet<_> = result.errors().iter().map(Diagnostic::key).collect();
        assert!(result.warnings().iter().all(|w| !errors.contains(&w.key())));
        assert!(result.errors().iter().all(|d| d.severity == Severity::Error));
        assert!(result.warnings().iter().all(|d| d.severity == Severity::Warning));
    }
}

#[test]
fn no_duplicate_keys_in_output() {
    for payload in corpus() {
        let result = normalize(&payload);
        let keys: Vec<_> = result.iter().map(Diagnostic::key).collect();
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }
}

#[test]
fn verdict_is_consistent() {
    for payload in corpus() {
        let result = normalize(&payload);
        if result.error_count() > 0 {
            assert!(!result.success(), "{}", result.summary_message());
        }
        if without_signal(&payload) {
            assert_eq!(result.success(), result.errors().is_empty());
        }
    }
}

#[test]
fn every_error_has_suggestions() {
    for payload in corpus() {
        let result = normalize(&payload);
        for error in result.errors() {
            assert!(!error.suggestions.is_empty(), "no hints for {:?}", error.message);
        }
    }
}

#[test]
fn normalization_is_deterministic() {
    for payload in corpus() {
        assert_eq!(normalize(&payload), normalize(&payload));
    }
}

#[test]
fn shared_normalizer_across_threads() {
    let normalizer = Arc::new(Normalizer::default());
    let expected: Vec<DiagnosticCollection> = corpus().iter().map(|p| normalizer.normalize(p)).collect();
    let expected = Arc::new(expected);
    let mut handles = Vec::new();

    for _ in 0..8 {
        let normalizer = Arc::clone(&normalizer);
        let expected = Arc::clone(&expected);
        handles.push(thread::spawn(move || {
            for (payload, want) in corpus().iter().zip(expected.iter()) {
                assert_eq!(&normalizer.normalize(payload), want);
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }
}
