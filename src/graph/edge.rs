//! Defines the `Relation` edge, one directed statement authored by a unit.

use super::node::NodeId;
use crate::vocabulary::RelationKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a relation within one graph, in authoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationId(pub u32);

impl RelationId {
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "r{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub id: RelationId,
    pub source: NodeId,
    pub kind: RelationKind,
    pub target: NodeId,
    /// The unit whose relationship text produced this edge.
    pub provenance: NodeId,
    /// The raw fragment, e.g. `"Copre 1002"`.
    pub fragment: String,
}
