//! Turns a stratigraphic graph into a layered Harris matrix.

use super::types::{HarrisMatrix, LateralLink, OrderLink};
use crate::analysis::{assign_layers, find_cycles, EquivalenceClasses, OrderGraph};
use crate::config::EngineConfig;
use crate::graph::{NodeId, RelationId, StratigraphicGraph};
use crate::store::UnitNumber;
use crate::validation::{Diagnostic, DiagnosticKind, Synchronizer};
use crate::vocabulary::OrderingClass;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

pub struct MatrixGenerator<'a> {
    graph: &'a StratigraphicGraph,
    config: &'a EngineConfig,
}

impl<'a> MatrixGenerator<'a> {
    pub fn new(graph: &'a StratigraphicGraph, config: &'a EngineConfig) -> Self {
        Self { graph, config }
    }

    /// Runs the full pipeline. Never fails: every problem found along the
    /// way is attached to the result as a diagnostic.
    pub fn generate(&self) -> HarrisMatrix {
        let g = self.graph;
        // 1. Collapse equivalence classes
        let classes = EquivalenceClasses::compute(g);

        let mut diagnostics: Vec<Diagnostic> = g.diagnostics().to_vec();
        diagnostics.extend(Synchronizer::with_classes(g, self.config, &classes).check());

        // 2. Reduce to strict-order edges between representatives, later -> earlier
        let mut order = OrderGraph::new(classes.representatives().to_vec());
        // Authored relations behind each reduced edge, in authoring order.
        let mut sources: HashMap<(NodeId, NodeId), Vec<RelationId>> = HashMap::new();
        let mut lateral = BTreeSet::new();

        for rel in g.relations() {
            match rel.kind.ordering_class() {
                OrderingClass::StrictOrder => {
                    if rel.source == rel.target {
                        let unit = g.unit_number(rel.source).clone();
                        diagnostics.push(
                            Diagnostic::new(
                                DiagnosticKind::Cycle,
                                vec![unit.clone()],
                                format!("'{}' on {} refers to itself", rel.fragment, unit),
                            )
                            .with_relations(vec![rel.id]),
                        );
                        continue;
                    }
                    let (upper, lower) = match rel.kind.is_above() {
                        Some(true) => (rel.source, rel.target),
                        _ => (rel.target, rel.source),
                    };
                    let (upper, lower) = (classes.representative(upper), classes.representative(lower));
                    if upper == lower {
                        debug!(relation = %rel.id, "dropping self-loop created by equivalence collapse");
                        continue;
                    }
                    order.add_edge(upper, lower);
                    sources.entry((upper, lower)).or_default().push(rel.id);
                }
                OrderingClass::Lateral => {
                    let (from, to) = (classes.representative(rel.source), classes.representative(rel.target));
                    if from == to {
                        continue;
                    }
                    // Store each link once, under the first-declared of the kind and its inverse.
                    let mut link = (g.unit_number(from).clone(), g.unit_number(to).clone(), rel.kind);
                    if rel.kind.inverse() < rel.kind {
                        link = (link.1, link.0, rel.kind.inverse());
                    } else if rel.kind.is_symmetric() && link.1 < link.0 {
                        link = (link.1, link.0, link.2);
                    }
                    lateral.insert(link);
                }
                OrderingClass::Equivalence => {}
            }
        }

        // 3. Cycles
        let report = find_cycles(&order);
        for cycle in &report.cycles {
            let units: Vec<UnitNumber> = cycle.iter().map(|&p| g.unit_number(order.node(p)).clone()).collect();
            let mut path: Vec<&str> = units.iter().map(UnitNumber::as_str).collect();
            path.push(units[0].as_str());

            // Closing edge last: (c0, c1), .., (cn, c0)
            let relations: Vec<RelationId> = cycle
                .iter()
                .zip(cycle.iter().cycle().skip(1))
                .filter_map(|(&u, &l)| sources.get(&(order.node(u), order.node(l))))
                .flatten()
                .copied()
                .collect();
            let fragments: Vec<String> = relations
                .iter()
                .filter_map(|&id| g.relation(id))
                .map(|rel| format!("'{}' on {}", rel.fragment, g.unit_number(rel.provenance)))
                .collect();

            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::Cycle,
                    units.clone(),
                    format!(
                        "strict-order cycle {} from {}; its edges are excluded from layering",
                        path.join(" > "),
                        fragments.join(", ")
                    ),
                )
                .with_relations(relations),
            );
        }

        // 4. Layers
        let layer_of = assign_layers(&order, &report.cyclic_edges);
        let depth = layer_of.iter().max().map_or(0, |&m| m + 1);
        let mut layers: Vec<Vec<UnitNumber>> = vec![Vec::new(); depth];
        // Positions are in ascending identifier order, so each layer comes out sorted.
        for (pos, &layer) in layer_of.iter().enumerate() {
            layers[layer].push(g.unit_number(order.node(pos)).clone());
        }

        let order_edges = order
            .edges()
            .filter(|e| !report.cyclic_edges.contains(e))
            .map(|(u, l)| OrderLink {
                upper: g.unit_number(order.node(u)).clone(),
                lower: g.unit_number(order.node(l)).clone(),
            })
            .collect();

        // 5. Lateral annotations
        let adjacencies = lateral
            .into_iter()
            .map(|(from, to, kind)| LateralLink { from, to, kind })
            .collect();

        info!(
            scope = %g.scope(),
            units = g.node_count(),
            layers = depth,
            cycles = report.cycles.len(),
            findings = diagnostics.len(),
            "generated harris matrix"
        );

        HarrisMatrix {
            scope: g.scope().clone(),
            layers,
            equivalence_classes: classes.to_unit_classes(g),
            order_edges,
            adjacencies,
            diagnostics,
        }
    }
}
