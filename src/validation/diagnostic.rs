//! Findings reported alongside a matrix.
use crate::graph::RelationId;
use crate::store::UnitNumber;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A fragment of relationship text could not be read; it was skipped.
    UnparsableText,
    /// A relation names a unit that has no record in the scope.
    UnknownTarget,
    /// A relation has no counterpart on its target; it is kept as one-sided.
    MissingInverse,
    /// Two relations on the same pair of units cannot both hold.
    ContradictoryRelation,
    /// A chain of strict-order relations loops back on itself.
    Cycle,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::UnparsableText => "UnparsableText",
            DiagnosticKind::UnknownTarget => "UnknownTarget",
            DiagnosticKind::MissingInverse => "MissingInverse",
            DiagnosticKind::ContradictoryRelation => "ContradictoryRelation",
            DiagnosticKind::Cycle => "Cycle",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Units involved; for cycles, in traversal order.
    pub units: Vec<UnitNumber>,
    /// Relations involved, when the finding is about specific edges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<RelationId>,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, units: Vec<UnitNumber>, detail: impl Into<String>) -> Self {
        Self { kind, units, relations: Vec::new(), detail: detail.into() }
    }

    pub fn with_relations(mut self, relations: Vec<RelationId>) -> Self {
        self.relations = relations;
        self
    }

    pub fn involves(&self, unit: &UnitNumber) -> bool { self.units.contains(unit) }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units: Vec<&str> = self.units.iter().map(UnitNumber::as_str).collect();
        write!(f, "[{}] {}: {}", self.kind, units.join(", "), self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(s: &str) -> UnitNumber { UnitNumber::parse(s).unwrap() }

    #[test]
    fn test_display_and_involvement() {
        let d = Diagnostic::new(DiagnosticKind::MissingInverse, vec![unit("1000"), unit("1002")], "one-sided")
            .with_relations(vec![RelationId::new(3)]);
        assert_eq!(d.to_string(), "[MissingInverse] 1000, 1002: one-sided");
        assert!(d.involves(&unit("1002")));
        assert!(!d.involves(&unit("1005")));
        assert_eq!(d.relations, vec![RelationId::new(3)]);
    }
}
