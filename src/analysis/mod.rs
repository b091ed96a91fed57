//! Graph analyses feeding the matrix generator.
pub mod equivalence;
pub mod topology;

pub use equivalence::EquivalenceClasses;
pub use topology::{assign_layers, find_cycles, CycleReport, OrderGraph};
