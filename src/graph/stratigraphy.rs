//! stratigraphy.rs
//! The scoped, typed multigraph of units and their authored relations.
//!
//! Nodes live in a petgraph arena and are addressed by `NodeId`; edges are
//! index pairs, so contradictory or cyclic input is representable as is.

use super::edge::{Relation, RelationId};
use super::node::{NodeId, UnitNode};
use crate::store::{Scope, UnitKind, UnitNumber};
use crate::validation::Diagnostic;
use crate::vocabulary::RelationKind;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct StratigraphicGraph {
    pub(crate) scope: Scope,
    pub(crate) graph: DiGraph<UnitNode, Relation>,
    pub(crate) index: HashMap<UnitNumber, NodeId>,
    /// Findings produced while reading the relationship texts.
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl StratigraphicGraph {
    pub fn new(scope: Scope) -> Self {
        Self { scope, ..Default::default() }
    }

    pub fn scope(&self) -> &Scope { &self.scope }

    /// Registers a recorded unit; re-registering returns the existing handle.
    /// A placeholder created earlier for the same number is upgraded.
    pub fn add_unit(&mut self, number: UnitNumber, kind: UnitKind) -> NodeId {
        if let Some(&id) = self.index.get(&number) {
            let node = &mut self.graph[id];
            if node.kind.is_none() {
                node.kind = Some(kind);
            }
            return id;
        }
        let id = self.graph.add_node(UnitNode::recorded(number.clone(), kind));
        self.index.insert(number, id);
        id
    }

    /// Registers an identifier that is referenced but has no record.
    pub fn add_placeholder(&mut self, number: UnitNumber) -> NodeId {
        if let Some(&id) = self.index.get(&number) {
            return id;
        }
        let id = self.graph.add_node(UnitNode::placeholder(number.clone()));
        self.index.insert(number, id);
        id
    }

    pub fn add_relation(
        &mut self,
        source: NodeId,
        kind: RelationKind,
        target: NodeId,
        fragment: impl Into<String>,
    ) -> RelationId {
        let id = RelationId::new(self.graph.edge_count());
        self.graph.add_edge(source, target, Relation {
            id,
            source,
            kind,
            target,
            provenance: source,
            fragment: fragment.into(),
        });
        id
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    // --- Accessors ---

    pub fn node_count(&self) -> usize { self.graph.node_count() }

    pub fn relation_count(&self) -> usize { self.graph.edge_count() }

    pub fn node(&self, id: NodeId) -> &UnitNode { &self.graph[id] }

    pub fn unit_number(&self, id: NodeId) -> &UnitNumber { &self.graph[id].number }

    pub fn node_id(&self, number: &UnitNumber) -> Option<NodeId> { self.index.get(number).copied() }

    pub fn contains(&self, number: &UnitNumber) -> bool { self.index.contains_key(number) }

    /// All relations in authoring order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.graph.edge_weights()
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.graph.edge_weight(petgraph::graph::EdgeIndex::new(id.index()))
    }

    /// Relations authored with `from` as source and `to` as target.
    pub fn relations_from_to(&self, from: NodeId, to: NodeId) -> impl Iterator<Item = &Relation> + '_ {
        self.graph
            .edges_directed(from, Direction::Outgoing)
            .filter(move |e| e.target() == to)
            .map(|e| e.weight())
    }

    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &Relation> + '_ {
        self.graph.edges_directed(id, Direction::Outgoing).map(|e| e.weight())
    }

    /// Node handles ordered by ascending unit identifier.
    pub fn sorted_nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.graph.node_indices().collect();
        ids.sort_by(|a, b| self.graph[*a].number.cmp(&self.graph[*b].number));
        ids
    }

    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }
}
