//! The engine entry point: one call per site+area scope.
//!
//! The engine holds configuration only. Each call builds its own graph and
//! throws it away, so scopes can be processed in parallel without locking.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::graph::{GraphBuilder, StratigraphicGraph};
use crate::matrix::{HarrisMatrix, MatrixGenerator};
use crate::parser::{parse_relations, ParsedFragment};
use crate::store::{Scope, UnitNumber, UnitRecord};
use crate::validation::{propagate, Diagnostic, Propagation, Synchronizer};
use crate::vocabulary::RelationKind;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct StratigraphicEngine {
    config: EngineConfig,
}

impl StratigraphicEngine {
    pub fn new(config: EngineConfig) -> Self { Self { config } }

    pub fn config(&self) -> &EngineConfig { &self.config }

    /// Parses one relationship field.
    pub fn parse(&self, text: &str) -> Vec<ParsedFragment> {
        parse_relations(text, &self.config.lexicon)
    }

    pub fn build_graph(&self, scope: &Scope, units: &[UnitRecord]) -> StratigraphicGraph {
        GraphBuilder::new(scope.clone(), &self.config.lexicon).build(units)
    }

    /// Builds the matrix for one scope. Units of other scopes are ignored.
    pub fn generate(&self, scope: &Scope, units: &[UnitRecord]) -> HarrisMatrix {
        let graph = self.build_graph(scope, units);
        MatrixGenerator::new(&graph, &self.config).generate()
    }

    /// Consistency findings only (parse, inverse and contradiction checks),
    /// without layering.
    pub fn check(&self, scope: &Scope, units: &[UnitRecord]) -> Vec<Diagnostic> {
        let graph = self.build_graph(scope, units);
        let mut diagnostics = graph.diagnostics().to_vec();
        diagnostics.extend(Synchronizer::new(&graph, &self.config).check());
        diagnostics
    }

    /// The edits that would give every one-sided relation its inverse.
    pub fn suggestions(&self, scope: &Scope, units: &[UnitRecord]) -> EngineResult<Vec<Propagation>> {
        let graph = self.build_graph(scope, units);
        Synchronizer::new(&graph, &self.config).suggestions()
    }

    /// Text to append to `target`'s record so it states the inverse of
    /// `unit kind target`. Pure; the caller persists it.
    pub fn propagate(&self, unit: &str, kind: RelationKind, target: &str) -> EngineResult<Propagation> {
        let unit = UnitNumber::parse(unit).ok_or_else(|| EngineError::InvalidUnitNumber(unit.to_string()))?;
        let target = UnitNumber::parse(target).ok_or_else(|| EngineError::InvalidUnitNumber(target.to_string()))?;
        propagate(&self.config.lexicon, &unit, kind, &target)
    }

    /// Groups records by site+area.
    pub fn partition_scopes(units: &[UnitRecord]) -> BTreeMap<Scope, Vec<UnitRecord>> {
        let mut scopes: BTreeMap<Scope, Vec<UnitRecord>> = BTreeMap::new();
        for unit in units {
            scopes.entry(unit.scope()).or_default().push(unit.clone());
        }
        scopes
    }

    /// One matrix per scope present in `units`, ordered by scope. Scopes are
    /// independent and processed in parallel.
    pub fn generate_all(&self, units: &[UnitRecord]) -> Vec<HarrisMatrix> {
        let scopes: Vec<(Scope, Vec<UnitRecord>)> = Self::partition_scopes(units).into_iter().collect();
        info!(scopes = scopes.len(), units = units.len(), "generating matrices");

        scopes
            .par_iter()
            .map(|(scope, records)| self.generate(scope, records))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::UnitKind;
    use crate::validation::DiagnosticKind;
    use tracing_test::traced_test;

    fn record(site: &str, area: &str, n: &str, text: &str) -> UnitRecord {
        UnitRecord::new(&Scope::new(site, area), UnitNumber::parse(n).unwrap(), UnitKind::Layer, text)
    }

    #[test]
    fn test_generate_all_keeps_scopes_apart() {
        let units = vec![
            record("Ostia", "B", "1", "Copre 2"),
            record("Ostia", "A", "1", "Taglia 2"),
            record("Ostia", "A", "2", "Tagliato da 1"),
            record("Ostia", "B", "2", ""),
        ];
        let engine = StratigraphicEngine::default();
        let matrices = engine.generate_all(&units);

        assert_eq!(matrices.len(), 2);
        assert_eq!(matrices[0].scope, Scope::new("Ostia", "A"));
        assert!(matrices[0].diagnostics.is_empty());
        assert_eq!(matrices[1].scope, Scope::new("Ostia", "B"));
        assert_eq!(matrices[1].diagnostics_of(DiagnosticKind::MissingInverse).count(), 1);
        for m in &matrices {
            assert_eq!(m.depth(), 2);
        }
    }

    #[test]
    fn test_generate_matches_generate_all_for_single_scope() {
        let units = vec![record("S", "1", "1", "Copre 2, Sotto 3"), record("S", "1", "2", "")];
        let engine = StratigraphicEngine::default();
        let single = engine.generate(&Scope::new("S", "1"), &units);
        assert_eq!(engine.generate_all(&units), vec![single]);
    }

    #[test]
    fn test_check_and_suggestions() {
        let units = vec![record("S", "1", "1", "Copre 2"), record("S", "1", "2", "Taglia 3"), record("S", "1", "3", "")];
        let engine = StratigraphicEngine::default();
        let scope = Scope::new("S", "1");

        assert_eq!(engine.check(&scope, &units).len(), 2);
        let fixes: Vec<String> = engine
            .suggestions(&scope, &units)
            .unwrap()
            .into_iter()
            .map(|p| format!("{} <- {}", p.unit, p.fragment))
            .collect();
        assert_eq!(fixes, vec!["2 <- Coperto da 1", "3 <- Tagliato da 2"]);
    }

    #[test]
    fn test_propagate_validates_identifiers() {
        let engine = StratigraphicEngine::default();
        let p = engine.propagate("1000", RelationKind::Covers, "1002").unwrap();
        assert_eq!(p.fragment, "Coperto da 1000");

        let err = engine.propagate("muro", RelationKind::Covers, "1002").unwrap_err();
        assert!(matches!(err, EngineError::InvalidUnitNumber(ref s) if s == "muro"), "Err: {}", err);
    }

    #[test]
    fn test_parse_exposes_every_fragment() {
        let engine = StratigraphicEngine::default();
        let fragments = engine.parse("Copre 1002, ???, Taglia 1005");
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments.iter().filter(|f| f.recognized().is_some()).count(), 2);
    }

    #[test]
    #[traced_test]
    fn test_generation_is_logged() {
        let units = vec![record("S", "1", "1", "Copre 2")];
        StratigraphicEngine::default().generate(&Scope::new("S", "1"), &units);
        assert!(logs_contain("built stratigraphic graph"));
        assert!(logs_contain("generated harris matrix"));
    }
}
