//! Consistency checking across independently edited unit records.
//!
//! Each unit's text is authored on its own, so nothing guarantees that
//! "1000 covers 1002" on one sheet is matched by "1002 covered by 1000" on
//! the other. The `Synchronizer` finds such gaps and contradictions, and
//! `propagate` computes the text that would close a gap.

pub use self::diagnostic::{Diagnostic, DiagnosticKind};
pub use self::propagate::{propagate, Propagation};
pub use self::sync::Synchronizer;

// --- MODULE DECLARATIONS ---
mod diagnostic;
mod propagate;
mod sync;
