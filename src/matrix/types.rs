//! The layered result handed to renderers and exporters.

use crate::error::EngineResult;
use crate::store::{Scope, UnitNumber};
use crate::validation::{Diagnostic, DiagnosticKind};
use crate::vocabulary::RelationKind;
use serde::{Deserialize, Serialize};

/// A strict-order link kept for drawing: `upper` is later than `lower`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderLink {
    pub upper: UnitNumber,
    pub lower: UnitNumber,
}

/// A lateral (no precedence) link, drawn as a same-phase annotation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LateralLink {
    pub from: UnitNumber,
    pub to: UnitNumber,
    pub kind: RelationKind,
}

/// A Harris matrix for one site+area.
///
/// All unit references are equivalence-class representatives except inside
/// `equivalence_classes` and `diagnostics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarrisMatrix {
    pub scope: Scope,
    /// Lowest (earliest) layer first; members in ascending identifier order.
    pub layers: Vec<Vec<UnitNumber>>,
    /// Every class, singletons included, ordered by representative (first member).
    pub equivalence_classes: Vec<Vec<UnitNumber>>,
    /// Strict-order links used for layering (cyclic ones excluded).
    pub order_edges: Vec<OrderLink>,
    pub adjacencies: Vec<LateralLink>,
    pub diagnostics: Vec<Diagnostic>,
}

impl HarrisMatrix {
    pub fn empty(scope: Scope) -> Self {
        Self { scope, ..Default::default() }
    }

    pub fn is_empty(&self) -> bool { self.layers.is_empty() }

    pub fn depth(&self) -> usize { self.layers.len() }

    /// The representative standing for `unit` in layers and links.
    pub fn representative_of(&self, unit: &UnitNumber) -> Option<&UnitNumber> {
        self.equivalence_classes
            .iter()
            .find(|class| class.contains(unit))
            .and_then(|class| class.first())
    }

    /// The layer holding `unit` (or its representative).
    pub fn layer_of(&self, unit: &UnitNumber) -> Option<usize> {
        let rep = self.representative_of(unit)?;
        self.layers.iter().position(|layer| layer.contains(rep))
    }

    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    pub fn has_cycles(&self) -> bool { self.diagnostics_of(DiagnosticKind::Cycle).next().is_some() }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
