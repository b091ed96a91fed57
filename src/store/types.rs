//! Record types handed to the engine by the data-access layer.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The domain identifier of a stratigraphic unit, unique within a site+area.
///
/// Numbers such as `1002` are the norm, but alphanumeric identifiers
/// (`US12a`, `1002-b`) occur in real archives. Ordering is natural: purely
/// numeric identifiers compare by value and sort before alphanumeric ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitNumber(String);

impl UnitNumber {
    /// Validates a token as a unit identifier.
    ///
    /// A valid identifier is non-empty, made of ASCII alphanumerics or one of
    /// `- _ . /`, and contains at least one digit.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() { return None; }

        let allowed = token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'));
        let has_digit = token.chars().any(|c| c.is_ascii_digit());

        if allowed && has_digit { Some(Self(token.to_string())) } else { None }
    }

    pub fn as_str(&self) -> &str { &self.0 }

    fn numeric_key(&self) -> Option<&str> {
        if self.0.chars().all(|c| c.is_ascii_digit()) {
            let trimmed = self.0.trim_start_matches('0');
            Some(if trimmed.is_empty() { "0" } else { trimmed })
        } else {
            None
        }
    }
}

impl Ord for UnitNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        let primary = match (self.numeric_key(), other.numeric_key()) {
            // Compare digit strings by length first so arbitrarily long numbers never overflow.
            (Some(a), Some(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        primary.then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for UnitNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl fmt::Display for UnitNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// The site+area pair a stratigraphic graph is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Scope {
    pub site: String,
    pub area: String,
}

impl Scope {
    pub fn new(site: impl Into<String>, area: impl Into<String>) -> Self {
        Self { site: site.into(), area: area.into() }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.site, self.area)
    }
}

/// The physical nature of a unit as recorded on the excavation sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitKind {
    #[default]
    Layer,
    /// A negative interface (pit, trench, robber cut).
    Cut,
    Fill,
    Structure,
    Deposit,
    Other,
}

/// One excavation unit as supplied by the caller.
///
/// The engine never mutates or persists records; they are borrowed for the
/// duration of a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub site: String,
    pub area: String,
    pub number: UnitNumber,
    #[serde(default)]
    pub kind: UnitKind,
    /// Free-text relationship field, e.g. `"Copre 1002, Taglia 1005"`.
    #[serde(default)]
    pub relationships: String,
}

impl UnitRecord {
    pub fn new(scope: &Scope, number: UnitNumber, kind: UnitKind, relationships: impl Into<String>) -> Self {
        Self {
            site: scope.site.clone(),
            area: scope.area.clone(),
            number,
            kind,
            relationships: relationships.into(),
        }
    }

    pub fn scope(&self) -> Scope { Scope::new(self.site.clone(), self.area.clone()) }

    pub fn in_scope(&self, scope: &Scope) -> bool {
        self.site == scope.site && self.area == scope.area
    }
}
