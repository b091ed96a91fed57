//! Phrase tables mapping domain wording to relation kinds.
//!
//! Recording sheets are written in the excavation's working language, so the
//! phrase table is configuration rather than code. The built-in tables cover
//! Italian (the ICCD recording standard) and English.

use super::normalize::normalize_phrase;
use super::RelationKind;
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a phrase table, as found in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub phrase: String,
    pub kind: RelationKind,
    /// Marks the phrase used when the engine writes text for this kind.
    #[serde(default)]
    pub preferred: bool,
}

impl LexiconEntry {
    pub fn new(phrase: impl Into<String>, kind: RelationKind, preferred: bool) -> Self {
        Self { phrase: phrase.into(), kind, preferred }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    /// Normalized phrase -> kind.
    phrases: HashMap<String, RelationKind>,
    /// Phrase used when rendering a kind back to text, as authored.
    preferred: HashMap<RelationKind, String>,
}

const ITALIAN: &[(&str, RelationKind, bool)] = &[
    ("Copre", RelationKind::Covers, true),
    ("Coperto da", RelationKind::CoveredBy, true),
    ("Taglia", RelationKind::Cuts, true),
    ("Tagliato da", RelationKind::CutBy, true),
    ("Riempie", RelationKind::Fills, true),
    ("Riempito da", RelationKind::FilledBy, true),
    ("Si appoggia a", RelationKind::LeansAgainst, true),
    ("Si appoggia", RelationKind::LeansAgainst, false),
    ("Gli si appoggia", RelationKind::SupportsLeaning, true),
    ("Si lega a", RelationKind::BondsWith, true),
    ("Uguale a", RelationKind::Equals, true),
    ("Uguale", RelationKind::Equals, false),
    ("Posteriore a", RelationKind::PostDates, true),
    ("Anteriore a", RelationKind::PreDates, true),
];

const ENGLISH: &[(&str, RelationKind, bool)] = &[
    ("Covers", RelationKind::Covers, true),
    ("Covered by", RelationKind::CoveredBy, true),
    ("Cuts", RelationKind::Cuts, true),
    ("Cut by", RelationKind::CutBy, true),
    ("Fills", RelationKind::Fills, true),
    ("Filled by", RelationKind::FilledBy, true),
    ("Leans against", RelationKind::LeansAgainst, true),
    ("Abuts", RelationKind::LeansAgainst, false),
    ("Abutted by", RelationKind::SupportsLeaning, true),
    ("Supports", RelationKind::SupportsLeaning, false),
    ("Bonds with", RelationKind::BondsWith, true),
    ("Same as", RelationKind::Equals, true),
    ("Equals", RelationKind::Equals, false),
    ("Equal to", RelationKind::Equals, false),
    ("Later than", RelationKind::PostDates, true),
    ("Earlier than", RelationKind::PreDates, true),
];

impl Lexicon {
    pub fn new() -> Self { Self::default() }

    pub fn italian() -> Self { Self::from_static(ITALIAN) }

    pub fn english() -> Self { Self::from_static(ENGLISH) }

    fn from_static(table: &[(&str, RelationKind, bool)]) -> Self {
        let mut lexicon = Self::new();
        for &(phrase, kind, preferred) in table {
            lexicon.phrases.insert(normalize_phrase(phrase), kind);
            if preferred {
                lexicon.preferred.insert(kind, phrase.to_string());
            }
        }
        lexicon
    }

    /// Builds a lexicon from configuration rows.
    ///
    /// The first phrase seen for a kind is preferred unless another row is
    /// explicitly marked `preferred`.
    pub fn from_entries(entries: &[LexiconEntry]) -> EngineResult<Self> {
        let mut lexicon = Self::new();
        for entry in entries {
            lexicon.insert(entry)?;
        }
        Ok(lexicon)
    }

    pub fn insert(&mut self, entry: &LexiconEntry) -> EngineResult<()> {
        let key = normalize_phrase(&entry.phrase);
        if key.is_empty() {
            return Err(EngineError::EmptyPhrase);
        }
        if let Some(&existing) = self.phrases.get(&key) {
            if existing != entry.kind {
                return Err(EngineError::ConflictingPhrase { phrase: key, first: existing, second: entry.kind });
            }
        }
        self.phrases.insert(key, entry.kind);

        let display = entry.phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        if entry.preferred {
            self.preferred.insert(entry.kind, display);
        } else {
            self.preferred.entry(entry.kind).or_insert(display);
        }
        Ok(())
    }

    /// Adds every phrase of `other`. Preferred phrases already set here win.
    pub fn merge(mut self, other: &Lexicon) -> EngineResult<Self> {
        for (phrase, &kind) in &other.phrases {
            if let Some(&existing) = self.phrases.get(phrase) {
                if existing != kind {
                    return Err(EngineError::ConflictingPhrase { phrase: phrase.clone(), first: existing, second: kind });
                }
            }
            self.phrases.insert(phrase.clone(), kind);
        }
        for (&kind, phrase) in &other.preferred {
            self.preferred.entry(kind).or_insert_with(|| phrase.clone());
        }
        Ok(self)
    }

    /// Resolves a phrase, ignoring case, accents and extra whitespace.
    pub fn lookup(&self, phrase: &str) -> Option<RelationKind> {
        self.phrases.get(&normalize_phrase(phrase)).copied()
    }

    /// The phrase used when writing `kind` into a unit's relationship text.
    pub fn phrase_for(&self, kind: RelationKind) -> EngineResult<&str> {
        self.preferred
            .get(&kind)
            .map(String::as_str)
            .ok_or(EngineError::MissingPhrase(kind))
    }

    pub fn len(&self) -> usize { self.phrases.len() }

    pub fn is_empty(&self) -> bool { self.phrases.is_empty() }
}

/// Italian first (preferred phrases), English accepted on input.
pub fn builtin() -> Lexicon {
    let mut lexicon = Lexicon::italian();
    for (phrase, &kind) in &Lexicon::english().phrases {
        lexicon.phrases.entry(phrase.clone()).or_insert(kind);
    }
    lexicon
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("copre", RelationKind::Covers)]
    #[case("COPERTO  DA", RelationKind::CoveredBy)]
    #[case("Taglia", RelationKind::Cuts)]
    #[case("si appoggia a", RelationKind::LeansAgainst)]
    #[case("Si appoggia", RelationKind::LeansAgainst)]
    #[case("riempie", RelationKind::Fills)]
    #[case("uguale a", RelationKind::Equals)]
    #[case("Uguale", RelationKind::Equals)]
    #[case("Cut by", RelationKind::CutBy)]
    #[case("abuts", RelationKind::LeansAgainst)]
    fn test_builtin_lookup(#[case] phrase: &str, #[case] expected: RelationKind) {
        assert_eq!(builtin().lookup(phrase), Some(expected), "Phrase: '{}'", phrase);
    }

    #[test]
    fn test_unknown_phrase() {
        assert_eq!(builtin().lookup("sotto"), None);
        assert_eq!(builtin().lookup(""), None);
    }

    #[test]
    fn test_every_kind_has_preferred_phrase() {
        for lexicon in [Lexicon::italian(), Lexicon::english(), builtin()] {
            for kind in RelationKind::ALL {
                assert!(lexicon.phrase_for(kind).is_ok(), "No phrase for {}", kind);
            }
        }
        assert_eq!(builtin().phrase_for(RelationKind::CoveredBy).unwrap(), "Coperto da");
    }

    #[test]
    fn test_from_entries_rejects_conflicts() {
        let entries = vec![
            LexiconEntry::new("recouvre", RelationKind::Covers, true),
            LexiconEntry::new("Recouvre", RelationKind::Cuts, false),
        ];
        let err = Lexicon::from_entries(&entries).unwrap_err();
        assert!(matches!(err, EngineError::ConflictingPhrase { .. }), "Err: {}", err);

        let empty = vec![LexiconEntry::new("   ", RelationKind::Covers, false)];
        assert!(matches!(Lexicon::from_entries(&empty), Err(EngineError::EmptyPhrase)));
    }

    #[test]
    fn test_explicit_preferred_wins() {
        let entries = vec![
            LexiconEntry::new("recouvre", RelationKind::Covers, false),
            LexiconEntry::new("couvre", RelationKind::Covers, true),
        ];
        let lexicon = Lexicon::from_entries(&entries).unwrap();
        assert_eq!(lexicon.phrase_for(RelationKind::Covers).unwrap(), "couvre");
        assert!(matches!(lexicon.phrase_for(RelationKind::Cuts), Err(EngineError::MissingPhrase(RelationKind::Cuts))));
    }

    #[test]
    fn test_merge_keeps_existing_preferred() {
        let merged = Lexicon::english().merge(&Lexicon::italian()).unwrap();
        assert_eq!(merged.phrase_for(RelationKind::Covers).unwrap(), "Covers");
        assert_eq!(merged.lookup("copre"), Some(RelationKind::Covers));
    }
}
