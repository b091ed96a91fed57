//! Ordering algorithms over the strict-order skeleton of a matrix.
//!
//! Edges point from the later (upper) unit to the earlier (lower) one, so
//! sinks are the earliest deposits and end up in layer 0.

use crate::graph::NodeId;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::warn;

/// A compact precedence graph over equivalence-class representatives.
///
/// Positions follow ascending unit identifier, and successor lists are kept
/// sorted, so every traversal below is deterministic.
#[derive(Debug, Clone, Default)]
pub struct OrderGraph {
    nodes: Vec<NodeId>,
    position: HashMap<NodeId, usize>,
    succ: Vec<SmallVec<[usize; 4]>>,
}

/// An edge by position: (upper, lower).
pub type OrderEdge = (usize, usize);

impl OrderGraph {
    /// `nodes` must already be in ascending identifier order.
    pub fn new(nodes: Vec<NodeId>) -> Self {
        let position = nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();
        let succ = vec![SmallVec::new(); nodes.len()];
        Self { nodes, position, succ }
    }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn node(&self, pos: usize) -> NodeId { self.nodes[pos] }

    pub fn position(&self, id: NodeId) -> Option<usize> { self.position.get(&id).copied() }

    /// Adds `upper -> lower`. Returns false for duplicates, self-loops and
    /// nodes unknown to this graph.
    pub fn add_edge(&mut self, upper: NodeId, lower: NodeId) -> bool {
        let (Some(u), Some(l)) = (self.position(upper), self.position(lower)) else {
            return false;
        };
        if u == l {
            return false;
        }
        match self.succ[u].binary_search(&l) {
            Ok(_) => false,
            Err(i) => {
                self.succ[u].insert(i, l);
                true
            }
        }
    }

    pub fn successors(&self, pos: usize) -> &[usize] { &self.succ[pos] }

    pub fn edges(&self) -> impl Iterator<Item = OrderEdge> + '_ {
        self.succ
            .iter()
            .enumerate()
            .flat_map(|(u, lows)| lows.iter().map(move |&l| (u, l)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Each cycle as a node sequence in traversal order (positions).
    pub cycles: Vec<Vec<usize>>,
    /// Every edge lying on a reported cycle.
    pub cyclic_edges: HashSet<OrderEdge>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    None,
    Visiting, // On the DFS stack
    Visited,
}

/// Depth-first search with recursion-stack tracking.
///
/// Every back edge closes one cycle: the stack slice from the edge's target
/// to the current node. Iterative, so deep sequences cannot overflow the
/// call stack.
pub fn find_cycles(graph: &OrderGraph) -> CycleReport {
    let count = graph.len();
    let mut state = vec![VisitState::None; count];
    let mut report = CycleReport::default();
    // (node, index of the next successor to explore)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..count {
        if state[start] != VisitState::None {
            continue;
        }
        state[start] = VisitState::Visiting;
        stack.push((start, 0));

        while let Some(top) = stack.len().checked_sub(1) {
            let (node, next) = stack[top];
            let Some(&child) = graph.successors(node).get(next) else {
                state[node] = VisitState::Visited;
                stack.pop();
                continue;
            };
            stack[top].1 += 1;

            match state[child] {
                VisitState::None => {
                    state[child] = VisitState::Visiting;
                    stack.push((child, 0));
                }
                VisitState::Visiting => {
                    if let Some(from) = stack.iter().position(|&(n, _)| n == child) {
                        let cycle: Vec<usize> = stack[from..].iter().map(|&(n, _)| n).collect();
                        for pair in cycle.windows(2) {
                            report.cyclic_edges.insert((pair[0], pair[1]));
                        }
                        report.cyclic_edges.insert((node, child));
                        report.cycles.push(cycle);
                    }
                }
                VisitState::Visited => {}
            }
        }
    }
    report
}

/// Longest-path layering: `layer(n) = 1 + max(layer(successor))`, sinks at 0.
///
/// Edges in `excluded` are ignored; the remainder must be acyclic. Relaxation
/// runs in Kahn order from the sinks upwards.
pub fn assign_layers(graph: &OrderGraph, excluded: &HashSet<OrderEdge>) -> Vec<usize> {
    let count = graph.len();
    let mut out_degree = vec![0usize; count];
    let mut preds: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); count];

    // 1. Initialize out-degrees and reverse adjacency O(E)
    for (upper, lower) in graph.edges() {
        if excluded.contains(&(upper, lower)) {
            continue;
        }
        out_degree[upper] += 1;
        preds[lower].push(upper);
    }

    let mut layer = vec![0usize; count];
    let mut queue: VecDeque<usize> = (0..count).filter(|&i| out_degree[i] == 0).collect();
    let mut processed = 0;

    // 2. Relax upwards from the sinks
    while let Some(node) = queue.pop_front() {
        processed += 1;
        for &upper in &preds[node] {
            layer[upper] = layer[upper].max(layer[node] + 1);
            out_degree[upper] -= 1;
            if out_degree[upper] == 0 {
                queue.push_back(upper);
            }
        }
    }

    if processed != count {
        warn!(unplaced = count - processed, "precedence graph still cyclic after exclusion; unplaced units kept at their partial layer");
    }
    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an order graph over positions 0..n with the given (upper, lower) edges.
    fn graph(n: usize, edges: &[(usize, usize)]) -> OrderGraph {
        let mut g = OrderGraph::new((0..n).map(NodeId::new).collect());
        for &(u, l) in edges {
            g.add_edge(NodeId::new(u), NodeId::new(l));
        }
        g
    }

    #[test]
    fn test_add_edge_dedupes_and_rejects_self_loops() {
        let mut g = graph(3, &[]);
        assert!(g.add_edge(NodeId::new(0), NodeId::new(2)));
        assert!(g.add_edge(NodeId::new(0), NodeId::new(1)));
        assert!(!g.add_edge(NodeId::new(0), NodeId::new(2)));
        assert!(!g.add_edge(NodeId::new(1), NodeId::new(1)));
        assert!(!g.add_edge(NodeId::new(1), NodeId::new(7)));
        assert_eq!(g.successors(0), &[1, 2]);
    }

    #[test]
    fn test_layers_diamond() {
        // Shape: 3 above 1 and 2, both above 0.
        let g = graph(4, &[(3, 1), (3, 2), (1, 0), (2, 0)]);
        assert!(find_cycles(&g).cycles.is_empty());
        assert_eq!(assign_layers(&g, &HashSet::new()), vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_longest_path_wins() {
        // 3 sits directly on 0 but also on the chain 2 -> 1 -> 0.
        let g = graph(4, &[(3, 0), (3, 2), (2, 1), (1, 0)]);
        let layers = assign_layers(&g, &HashSet::new());
        assert_eq!(layers, vec![0, 1, 2, 3]);
        for (u, l) in g.edges() {
            assert!(layers[u] > layers[l]);
        }
    }

    #[test]
    fn test_cycle_detection_and_exclusion() {
        // 0 -> 1 -> 2 -> 0, with 3 above 0.
        let g = graph(4, &[(0, 1), (1, 2), (2, 0), (3, 0)]);
        let report = find_cycles(&g);
        assert_eq!(report.cycles, vec![vec![0, 1, 2]]);
        assert_eq!(report.cyclic_edges, HashSet::from([(0, 1), (1, 2), (2, 0)]));

        let layers = assign_layers(&g, &report.cyclic_edges);
        assert_eq!(layers, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_two_cycles_sharing_a_node() {
        let g = graph(3, &[(0, 1), (1, 0), (1, 2), (2, 1)]);
        let report = find_cycles(&g);
        assert_eq!(report.cycles, vec![vec![0, 1], vec![1, 2]]);
        assert_eq!(assign_layers(&g, &report.cyclic_edges), vec![0, 0, 0]);
    }

    #[test]
    fn test_empty_graph() {
        let g = OrderGraph::default();
        assert!(g.is_empty());
        assert!(find_cycles(&g).cycles.is_empty());
        assert!(assign_layers(&g, &HashSet::new()).is_empty());
    }
}
