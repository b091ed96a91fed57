//! Defines the core data structures for the stratigraphic graph.
pub mod builder;
pub mod edge;
pub mod node;
pub mod stratigraphy;

// Re-export key types for convenient access
pub use builder::GraphBuilder;
pub use edge::{Relation, RelationId};
pub use node::{NodeId, UnitNode};
pub use stratigraphy::StratigraphicGraph;
