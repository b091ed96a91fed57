//! Assembles the units of one site+area into a `StratigraphicGraph`.

use super::stratigraphy::StratigraphicGraph;
use crate::parser::{parse_relations, ParsedFragment};
use crate::store::{Scope, UnitRecord};
use crate::validation::{Diagnostic, DiagnosticKind};
use crate::vocabulary::Lexicon;
use tracing::{debug, info, warn};

pub struct GraphBuilder<'a> {
    scope: Scope,
    lexicon: &'a Lexicon,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(scope: Scope, lexicon: &'a Lexicon) -> Self {
        Self { scope, lexicon }
    }

    /// Builds the graph in two passes.
    ///
    /// 1. Register every unit of the scope, so forward references resolve.
    /// 2. Parse each unit's text and add an edge per recognized relation.
    pub fn build(&self, units: &[UnitRecord]) -> StratigraphicGraph {
        let mut graph = StratigraphicGraph::new(self.scope.clone());

        let in_scope: Vec<&UnitRecord> = units.iter().filter(|u| u.in_scope(&self.scope)).collect();
        let skipped = units.len() - in_scope.len();
        if skipped > 0 {
            warn!(scope = %self.scope, skipped, "ignoring units recorded under another site/area");
        }

        // 1. Nodes
        for unit in &in_scope {
            if graph.contains(&unit.number) {
                debug!(unit = %unit.number, "duplicate unit record, merging relationship text");
            }
            graph.add_unit(unit.number.clone(), unit.kind);
        }

        // 2. Edges
        for unit in &in_scope {
            self.add_relations(&mut graph, unit);
        }

        info!(
            scope = %self.scope,
            units = graph.node_count(),
            relations = graph.relation_count(),
            findings = graph.diagnostics().len(),
            "built stratigraphic graph"
        );
        graph
    }

    fn add_relations(&self, graph: &mut StratigraphicGraph, unit: &UnitRecord) {
        let Some(source) = graph.node_id(&unit.number) else { return };

        for parsed in parse_relations(&unit.relationships, self.lexicon) {
            match parsed {
                ParsedFragment::Recognized(rel) => {
                    let target = graph.node_id(&rel.target).filter(|&t| !graph.node(t).is_placeholder());
                    if let Some(target) = target {
                        graph.add_relation(source, rel.kind, target, rel.fragment);
                    } else {
                        // Keep the referenced identifier visible, but unconnected.
                        graph.add_placeholder(rel.target.clone());
                        graph.push_diagnostic(Diagnostic::new(
                            DiagnosticKind::UnknownTarget,
                            vec![unit.number.clone(), rel.target.clone()],
                            format!("unknown target: '{}' names a unit with no record in {}", rel.fragment, self.scope),
                        ));
                    }
                }
                ParsedFragment::Unparsable(bad) => {
                    debug!(unit = %unit.number, fragment = %bad.fragment, "skipping unparsable fragment");
                    graph.push_diagnostic(Diagnostic::new(
                        DiagnosticKind::UnparsableText,
                        vec![unit.number.clone()],
                        format!("'{}': {}", bad.fragment, bad.reason),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{UnitKind, UnitNumber};
    use crate::vocabulary::lexicon::builtin;
    use crate::vocabulary::RelationKind;

    fn unit(s: &str) -> UnitNumber { UnitNumber::parse(s).unwrap() }

    fn record(scope: &Scope, n: &str, text: &str) -> UnitRecord {
        UnitRecord::new(scope, unit(n), UnitKind::Layer, text)
    }

    #[test]
    fn test_build_reference_example() {
        let scope = Scope::new("Roma", "A");
        let units = vec![
            record(&scope, "1000", "Copre 1002, Taglia 1005, Si appoggia a 1001"),
            record(&scope, "1001", ""),
            record(&scope, "1002", ""),
            record(&scope, "1005", ""),
        ];
        let lexicon = builtin();
        let g = GraphBuilder::new(scope, &lexicon).build(&units);

        assert_eq!(g.node_count(), 4);
        assert_eq!(g.relation_count(), 3);
        assert!(g.diagnostics().is_empty());

        let kinds: Vec<RelationKind> = g.relations().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RelationKind::Covers, RelationKind::Cuts, RelationKind::LeansAgainst]);
        let source = g.node_id(&unit("1000")).unwrap();
        assert!(g.relations().all(|r| r.source == source && r.provenance == source));
    }

    #[test]
    fn test_unknown_target_becomes_isolated_placeholder() {
        let scope = Scope::new("Roma", "A");
        let units = vec![record(&scope, "1", "Copre 2, Copre 3")];
        let lexicon = builtin();
        let g = GraphBuilder::new(scope, &lexicon).build(&units);

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.relation_count(), 0);
        let placeholder = g.node_id(&unit("2")).unwrap();
        assert!(g.node(placeholder).is_placeholder());

        let kinds: Vec<DiagnosticKind> = g.diagnostics().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::UnknownTarget, DiagnosticKind::UnknownTarget]);
        assert!(g.diagnostics()[0].detail.contains("unknown target"));
    }

    #[test]
    fn test_unparsable_fragment_is_reported_and_skipped() {
        let scope = Scope::new("Roma", "A");
        let units = vec![record(&scope, "1", "Copre 2, Sotto 2"), record(&scope, "2", "")];
        let lexicon = builtin();
        let g = GraphBuilder::new(scope, &lexicon).build(&units);

        assert_eq!(g.relation_count(), 1);
        assert_eq!(g.diagnostics().len(), 1);
        assert_eq!(g.diagnostics()[0].kind, DiagnosticKind::UnparsableText);
        assert_eq!(g.diagnostics()[0].units, vec![unit("1")]);
    }

    #[test]
    fn test_other_scopes_and_duplicates() {
        let scope = Scope::new("Roma", "A");
        let other = Scope::new("Roma", "B");
        let units = vec![
            record(&scope, "1", "Copre 2"),
            record(&scope, "1", "Taglia 3"),
            record(&scope, "2", ""),
            record(&scope, "3", ""),
            record(&other, "9", "Copre 1"),
        ];
        let lexicon = builtin();
        let g = GraphBuilder::new(scope, &lexicon).build(&units);

        assert_eq!(g.node_count(), 3);
        assert!(!g.contains(&unit("9")));
        assert_eq!(g.relation_count(), 2, "both records of unit 1 contribute");
    }

    #[test]
    fn test_empty_input() {
        let lexicon = builtin();
        let g = GraphBuilder::new(Scope::default(), &lexicon).build(&[]);
        assert_eq!(g.node_count(), 0);
        assert!(g.diagnostics().is_empty());
    }
}
