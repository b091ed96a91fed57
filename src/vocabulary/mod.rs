//! The closed vocabulary of stratigraphic relations.
//!
//! Every relation kind knows its inverse and the ordering class it belongs
//! to. Language-specific phrases live in the [`Lexicon`], which is data and
//! can be swapped per deployment.

pub mod lexicon;
pub mod normalize;

pub use lexicon::{Lexicon, LexiconEntry};

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a relation kind constrains the relative chronology of two units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingClass {
    /// One unit is strictly later (above) than the other.
    StrictOrder,
    /// Both units are the same stratigraphic entity.
    Equivalence,
    /// Same relative phase, no precedence.
    Lateral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationKind {
    Covers,
    CoveredBy,
    Cuts,
    CutBy,
    Fills,
    FilledBy,
    /// Generic "later than" when the physical contact is not recorded.
    PostDates,
    PreDates,
    Equals,
    LeansAgainst,
    /// Inverse of `LeansAgainst`: another unit leans against this one.
    SupportsLeaning,
    /// Bonded masonry, built together.
    BondsWith,
}

/// Groups of strict-order kinds that describe the same physical contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Cover,
    Cut,
    Fill,
    Chronological,
    Other,
}

impl RelationKind {
    pub const ALL: [RelationKind; 12] = [
        RelationKind::Covers,
        RelationKind::CoveredBy,
        RelationKind::Cuts,
        RelationKind::CutBy,
        RelationKind::Fills,
        RelationKind::FilledBy,
        RelationKind::PostDates,
        RelationKind::PreDates,
        RelationKind::Equals,
        RelationKind::LeansAgainst,
        RelationKind::SupportsLeaning,
        RelationKind::BondsWith,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RelationKind::Covers => "Covers",
            RelationKind::CoveredBy => "CoveredBy",
            RelationKind::Cuts => "Cuts",
            RelationKind::CutBy => "CutBy",
            RelationKind::Fills => "Fills",
            RelationKind::FilledBy => "FilledBy",
            RelationKind::PostDates => "PostDates",
            RelationKind::PreDates => "PreDates",
            RelationKind::Equals => "Equals",
            RelationKind::LeansAgainst => "LeansAgainst",
            RelationKind::SupportsLeaning => "SupportsLeaning",
            RelationKind::BondsWith => "BondsWith",
        }
    }

    /// Resolves a canonical kind name (`"CoveredBy"`), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn inverse(self) -> Self {
        match self {
            RelationKind::Covers => RelationKind::CoveredBy,
            RelationKind::CoveredBy => RelationKind::Covers,
            RelationKind::Cuts => RelationKind::CutBy,
            RelationKind::CutBy => RelationKind::Cuts,
            RelationKind::Fills => RelationKind::FilledBy,
            RelationKind::FilledBy => RelationKind::Fills,
            RelationKind::PostDates => RelationKind::PreDates,
            RelationKind::PreDates => RelationKind::PostDates,
            RelationKind::Equals => RelationKind::Equals,
            RelationKind::LeansAgainst => RelationKind::SupportsLeaning,
            RelationKind::SupportsLeaning => RelationKind::LeansAgainst,
            RelationKind::BondsWith => RelationKind::BondsWith,
        }
    }

    pub fn ordering_class(self) -> OrderingClass {
        match self {
            RelationKind::Equals => OrderingClass::Equivalence,
            RelationKind::LeansAgainst | RelationKind::SupportsLeaning | RelationKind::BondsWith => {
                OrderingClass::Lateral
            }
            _ => OrderingClass::StrictOrder,
        }
    }

    pub fn is_symmetric(self) -> bool { self.inverse() == self }

    /// For strict-order kinds, whether the source is the later (upper) unit.
    /// `None` for kinds that carry no precedence.
    pub fn is_above(self) -> Option<bool> {
        match self {
            RelationKind::Covers | RelationKind::Cuts | RelationKind::Fills | RelationKind::PostDates => Some(true),
            RelationKind::CoveredBy | RelationKind::CutBy | RelationKind::FilledBy | RelationKind::PreDates => Some(false),
            _ => None,
        }
    }

    fn family(self) -> Family {
        match self {
            RelationKind::Covers | RelationKind::CoveredBy => Family::Cover,
            RelationKind::Cuts | RelationKind::CutBy => Family::Cut,
            RelationKind::Fills | RelationKind::FilledBy => Family::Fill,
            RelationKind::PostDates | RelationKind::PreDates => Family::Chronological,
            _ => Family::Other,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Whether two relations between the same pair of units cannot both hold.
///
/// `same_direction` is true when both relations share source and target.
/// Oppositely oriented relations are compared after re-expressing `b`
/// through its inverse, so `A Covers B` and `B CoveredBy A` agree.
pub fn is_contradictory(a: RelationKind, b: RelationKind, same_direction: bool) -> bool {
    let b = if same_direction { b } else { b.inverse() };

    match (a.ordering_class(), b.ordering_class()) {
        (OrderingClass::StrictOrder, OrderingClass::Equivalence)
        | (OrderingClass::Equivalence, OrderingClass::StrictOrder) => true,
        (OrderingClass::StrictOrder, OrderingClass::StrictOrder) => {
            if a.is_above() != b.is_above() {
                return true;
            }
            // A cut is an interface: it cannot also be deposited over or into the same unit.
            match (a.family(), b.family()) {
                (Family::Cut, Family::Cover | Family::Fill) | (Family::Cover | Family::Fill, Family::Cut) => true,
                _ => false,
            }
        }
        _ => false,
    }
}
