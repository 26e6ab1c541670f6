//! Normalized compiler diagnostics and the collection produced per compile.
//!
//! This crate provides the [`Diagnostic`] record shared by every consumer of
//! compiler output, the [`DiagnosticCollection`] output contract with its
//! success verdict, and [`DiagnosticRenderer`] implementations that format
//! diagnostics for the terminal.

#![warn(missing_docs)]

pub mod code;
pub mod collection;
pub mod diagnostic;
pub mod renderer;
pub mod severity;

pub use code::DiagnosticCode;
pub use collection::DiagnosticCollection;
pub use diagnostic::{Diagnostic, DiagnosticKey, UNKNOWN_FILE};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
