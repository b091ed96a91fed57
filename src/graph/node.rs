//! Defines the `UnitNode`, one stratigraphic unit within a scoped graph.

use crate::store::{UnitKind, UnitNumber};
use petgraph::graph::NodeIndex;

/// A stable handle to a unit within one `StratigraphicGraph`.
///
/// This is a type alias for `petgraph::graph::NodeIndex` to abstract the
/// underlying graph implementation. Handles are only meaningful for the graph
/// that issued them.
pub type NodeId = NodeIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitNode {
    pub number: UnitNumber,
    /// `None` for placeholder nodes: identifiers referenced by a relation
    /// that have no record in the scope.
    pub kind: Option<UnitKind>,
}

impl UnitNode {
    pub fn recorded(number: UnitNumber, kind: UnitKind) -> Self {
        Self { number, kind: Some(kind) }
    }

    pub fn placeholder(number: UnitNumber) -> Self {
        Self { number, kind: None }
    }

    pub fn is_placeholder(&self) -> bool { self.kind.is_none() }
}
