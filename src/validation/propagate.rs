//! The explicit "propagate" operation.
//!
//! Given a relation authored by one unit, compute the text its partner needs
//! so both records agree. Nothing here touches a record: the caller's
//! persistence layer decides whether and when to apply the result.

use crate::error::EngineResult;
use crate::parser::recognized_relations;
use crate::store::UnitNumber;
use crate::vocabulary::{Lexicon, RelationKind};
use serde::Serialize;

/// A suggested edit to one unit's relationship text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Propagation {
    /// The unit whose text should receive `fragment`.
    pub unit: UnitNumber,
    /// The inverse kind being stated.
    pub kind: RelationKind,
    /// The unit the fragment points back to.
    pub partner: UnitNumber,
    /// Text to append, e.g. `"Coperto da 1000"`.
    pub fragment: String,
}

/// Computes the inverse of `unit kind target` as seen from `target`.
pub fn propagate(
    lexicon: &Lexicon,
    unit: &UnitNumber,
    kind: RelationKind,
    target: &UnitNumber,
) -> EngineResult<Propagation> {
    let inverse = kind.inverse();
    let phrase = lexicon.phrase_for(inverse)?;
    Ok(Propagation {
        unit: target.clone(),
        kind: inverse,
        partner: unit.clone(),
        fragment: format!("{} {}", phrase, unit),
    })
}

impl Propagation {
    /// Returns `text` with the fragment appended, or `text` unchanged when it
    /// already states this relation in any wording the lexicon knows.
    pub fn apply_to(&self, text: &str, lexicon: &Lexicon) -> String {
        let present = recognized_relations(text, lexicon)
            .into_iter()
            .any(|(kind, target)| kind == self.kind && target == self.partner);
        if present {
            return text.to_string();
        }

        let head = text.trim_end().trim_end_matches(',').trim_end();
        if head.trim().is_empty() {
            self.fragment.clone()
        } else {
            format!("{}, {}", head, self.fragment)
        }
    }
}
