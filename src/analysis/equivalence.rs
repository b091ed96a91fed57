//! Equivalence classes induced by `Equals` relations.

use crate::graph::{NodeId, StratigraphicGraph};
use crate::store::UnitNumber;
use crate::vocabulary::OrderingClass;
use petgraph::unionfind::UnionFind;
use std::collections::HashMap;

/// Transitive closure of `Equals` over a graph.
///
/// Every node belongs to exactly one class; a node untouched by `Equals` is a
/// singleton. The representative is the member with the smallest identifier.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceClasses {
    rep_of: Vec<NodeId>,
    members: HashMap<NodeId, Vec<NodeId>>,
    /// Representatives in ascending identifier order.
    reps: Vec<NodeId>,
}

impl EquivalenceClasses {
    pub fn compute(graph: &StratigraphicGraph) -> Self {
        let count = graph.node_count();
        let mut uf = UnionFind::<usize>::new(count);

        for rel in graph.relations() {
            if rel.kind.ordering_class() == OrderingClass::Equivalence {
                uf.union(rel.source.index(), rel.target.index());
            }
        }

        // Group by root, visiting nodes in identifier order so member lists come out sorted.
        let mut groups: HashMap<usize, Vec<NodeId>> = HashMap::new();
        for id in graph.sorted_nodes() {
            groups.entry(uf.find(id.index())).or_default().push(id);
        }

        let mut rep_of = vec![NodeId::new(0); count];
        let mut members = HashMap::with_capacity(groups.len());
        let mut reps = Vec::with_capacity(groups.len());
        for (_, group) in groups {
            let rep = group[0];
            for &m in &group {
                rep_of[m.index()] = rep;
            }
            reps.push(rep);
            members.insert(rep, group);
        }
        reps.sort_by(|a, b| graph.unit_number(*a).cmp(graph.unit_number(*b)));

        Self { rep_of, members, reps }
    }

    pub fn representative(&self, id: NodeId) -> NodeId { self.rep_of[id.index()] }

    pub fn same_class(&self, a: NodeId, b: NodeId) -> bool { self.representative(a) == self.representative(b) }

    /// Members of the class of `id`, in ascending identifier order.
    pub fn members(&self, id: NodeId) -> &[NodeId] {
        self.members
            .get(&self.representative(id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Representatives in ascending identifier order.
    pub fn representatives(&self) -> &[NodeId] { &self.reps }

    pub fn class_count(&self) -> usize { self.reps.len() }

    /// All classes as identifier lists, ordered by representative.
    pub fn to_unit_classes(&self, graph: &StratigraphicGraph) -> Vec<Vec<UnitNumber>> {
        self.reps
            .iter()
            .map(|&rep| self.members(rep).iter().map(|&m| graph.unit_number(m).clone()).collect())
            .collect()
    }
}
