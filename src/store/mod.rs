//! Input records consumed by the engine.
pub mod types;

pub use types::{Scope, UnitKind, UnitNumber, UnitRecord};
