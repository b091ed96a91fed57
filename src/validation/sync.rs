//! The consistency synchronizer.
//!
//! Checks that every relation is matched by its inverse on the partner unit
//! and that no two relations on the same pair contradict each other. It
//! reports; it never adjudicates or edits.

use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::propagate::{propagate, Propagation};
use crate::analysis::EquivalenceClasses;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::graph::{NodeId, Relation, StratigraphicGraph};
use crate::vocabulary::{is_contradictory, OrderingClass};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

pub struct Synchronizer<'a> {
    graph: &'a StratigraphicGraph,
    config: &'a EngineConfig,
    classes: Option<Cow<'a, EquivalenceClasses>>,
}

impl<'a> Synchronizer<'a> {
    pub fn new(graph: &'a StratigraphicGraph, config: &'a EngineConfig) -> Self {
        let classes = config
            .infer_inverse_through_equivalence
            .then(|| Cow::Owned(EquivalenceClasses::compute(graph)));
        Self { graph, config, classes }
    }

    /// Reuses classes already computed for `graph`.
    pub fn with_classes(
        graph: &'a StratigraphicGraph,
        config: &'a EngineConfig,
        classes: &'a EquivalenceClasses,
    ) -> Self {
        let classes = config.infer_inverse_through_equivalence.then_some(Cow::Borrowed(classes));
        Self { graph, config, classes }
    }

    /// Runs both consistency rules and returns every finding.
    pub fn check(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if self.config.report_missing_inverse {
            for rel in self.missing_inverses() {
                diagnostics.push(self.missing_inverse_diagnostic(rel));
            }
        }
        diagnostics.extend(self.contradictions());

        debug!(scope = %self.graph.scope(), findings = diagnostics.len(), "consistency check complete");
        diagnostics
    }

    /// Relations with no explicit or inferable inverse, deduplicated by
    /// (source, kind, target), in authoring order.
    pub fn missing_inverses(&self) -> Vec<&'a Relation> {
        let mut seen = HashSet::new();
        self.graph
            .relations()
            .filter(|rel| rel.source != rel.target)
            .filter(|rel| !self.has_inverse(rel))
            .filter(|rel| seen.insert((rel.source, rel.kind, rel.target)))
            .collect()
    }

    /// One propagation per missing inverse: what the partner's text needs.
    pub fn suggestions(&self) -> EngineResult<Vec<Propagation>> {
        self.missing_inverses()
            .into_iter()
            .map(|rel| {
                propagate(
                    &self.config.lexicon,
                    self.graph.unit_number(rel.source),
                    rel.kind,
                    self.graph.unit_number(rel.target),
                )
            })
            .collect()
    }

    fn has_inverse(&self, rel: &Relation) -> bool {
        let wanted = rel.kind.inverse();
        if self.graph.relations_from_to(rel.target, rel.source).any(|r| r.kind == wanted) {
            return true;
        }

        // Equality itself must be stated on both records.
        let Some(classes) = self.classes.as_deref() else { return false };
        if rel.kind.ordering_class() == OrderingClass::Equivalence {
            return false;
        }

        classes.members(rel.target).iter().any(|&member| {
            self.graph
                .outgoing(member)
                .any(|r| r.kind == wanted && classes.same_class(r.target, rel.source))
        })
    }

    fn missing_inverse_diagnostic(&self, rel: &Relation) -> Diagnostic {
        let source = self.graph.unit_number(rel.source);
        let target = self.graph.unit_number(rel.target);
        Diagnostic::new(
            DiagnosticKind::MissingInverse,
            vec![source.clone(), target.clone()],
            format!(
                "'{}' on {} is not matched by {} {} on {}",
                rel.fragment, source, rel.kind.inverse(), source, target
            ),
        )
        .with_relations(vec![rel.id])
    }

    /// One finding per pair of relations on the same two units that cannot both hold.
    fn contradictions(&self) -> Vec<Diagnostic> {
        let g = self.graph;

        // Group by unordered pair, keyed by identifiers for a deterministic report order.
        let mut pairs: BTreeMap<(&_, &_), Vec<&Relation>> = BTreeMap::new();
        for rel in g.relations() {
            let (lo, hi) = ordered_pair(g, rel.source, rel.target);
            pairs.entry((g.unit_number(lo), g.unit_number(hi))).or_default().push(rel);
        }

        let mut out = Vec::new();
        for ((lo, hi), rels) in pairs {
            for (i, a) in rels.iter().enumerate() {
                for b in &rels[i + 1..] {
                    let same_direction = a.source == b.source;
                    if !is_contradictory(a.kind, b.kind, same_direction) {
                        continue;
                    }
                    out.push(
                        Diagnostic::new(
                            DiagnosticKind::ContradictoryRelation,
                            vec![lo.clone(), hi.clone()],
                            format!(
                                "'{}' on {} conflicts with '{}' on {}",
                                a.fragment,
                                g.unit_number(a.provenance),
                                b.fragment,
                                g.unit_number(b.provenance)
                            ),
                        )
                        .with_relations(vec![a.id, b.id]),
                    );
                }
            }
        }
        out
    }
}

fn ordered_pair(g: &StratigraphicGraph, a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if g.unit_number(a) <= g.unit_number(b) { (a, b) } else { (b, a) }
}
