//! Parser for the free-text relationship field of a unit.
//!
//! The field is a comma-separated list such as
//! `"Copre 1002, Taglia 1005, Si appoggia a 1001"`. Each fragment is
//! `<phrase> <target>`: the last token names the target unit and everything
//! before it is the relation phrase.

use crate::store::UnitNumber;
use crate::vocabulary::{Lexicon, RelationKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedRelation {
    pub kind: RelationKind,
    pub target: UnitNumber,
    /// The trimmed source fragment.
    pub fragment: String,
}

/// Why a fragment was skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnparseReason {
    #[error("expected '<relation> <unit>', found a single token")]
    TooFewTokens,
    #[error("unrecognized relation phrase '{0}'")]
    UnknownPhrase(String),
    #[error("'{0}' is not a valid unit identifier")]
    InvalidTarget(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsableFragment {
    pub fragment: String,
    pub reason: UnparseReason,
}

/// Outcome for one comma-separated fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedFragment {
    Recognized(RecognizedRelation),
    Unparsable(UnparsableFragment),
}

impl ParsedFragment {
    pub fn recognized(&self) -> Option<&RecognizedRelation> {
        match self {
            ParsedFragment::Recognized(r) => Some(r),
            ParsedFragment::Unparsable(_) => None,
        }
    }
}

/// Splits a relationship field into typed fragments.
///
/// Empty fragments (doubled commas, trailing comma) are ignored. A bad
/// fragment never prevents the rest from being parsed.
pub fn parse_relations(text: &str, lexicon: &Lexicon) -> Vec<ParsedFragment> {
    text.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| parse_fragment(f, lexicon))
        .collect()
}

/// Convenience for callers that only want the recognized relations.
pub fn recognized_relations(text: &str, lexicon: &Lexicon) -> Vec<(RelationKind, UnitNumber)> {
    parse_relations(text, lexicon)
        .into_iter()
        .filter_map(|p| match p {
            ParsedFragment::Recognized(r) => Some((r.kind, r.target)),
            ParsedFragment::Unparsable(_) => None,
        })
        .collect()
}

fn parse_fragment(fragment: &str, lexicon: &Lexicon) -> ParsedFragment {
    let unparsable = |reason| {
        ParsedFragment::Unparsable(UnparsableFragment { fragment: fragment.to_string(), reason })
    };

    let tokens: Vec<&str> = fragment.split_whitespace().collect();
    let Some((&last, phrase_tokens)) = tokens.split_last() else {
        return unparsable(UnparseReason::TooFewTokens);
    };
    if phrase_tokens.is_empty() {
        return unparsable(UnparseReason::TooFewTokens);
    }

    let phrase = phrase_tokens.join(" ");
    let Some(kind) = lexicon.lookup(&phrase) else {
        return unparsable(UnparseReason::UnknownPhrase(phrase));
    };

    let target_token = last.trim_matches(|c| matches!(c, '.' | ';' | ':'));
    match UnitNumber::parse(target_token) {
        Some(target) => ParsedFragment::Recognized(RecognizedRelation {
            kind,
            target,
            fragment: fragment.to_string(),
        }),
        None => unparsable(UnparseReason::InvalidTarget(last.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::lexicon::builtin;
    use rstest::rstest;

    fn unit(s: &str) -> UnitNumber { UnitNumber::parse(s).unwrap() }

    #[test]
    fn test_parse_reference_example() {
        let parsed = recognized_relations("Copre 1002, Taglia 1005, Si appoggia a 1001", &builtin());
        assert_eq!(parsed, vec![
            (RelationKind::Covers, unit("1002")),
            (RelationKind::Cuts, unit("1005")),
            (RelationKind::LeansAgainst, unit("1001")),
        ]);
    }

    #[rstest]
    #[case("copre 12", RelationKind::Covers, "12")]
    #[case("COPRE 12", RelationKind::Covers, "12")]
    #[case("Coperto   da   7", RelationKind::CoveredBy, "7")]
    #[case("uguale à 44", RelationKind::Equals, "44")]
    #[case("uguale a\u{300} 44", RelationKind::Equals, "44")]
    #[case("Gli si appoggia US3b", RelationKind::SupportsLeaning, "US3b")]
    #[case("Riempito da 1010.", RelationKind::FilledBy, "1010")]
    #[case("Same as 2001", RelationKind::Equals, "2001")]
    fn test_parse_valid_fragment(#[case] text: &str, #[case] kind: RelationKind, #[case] target: &str) {
        let parsed = parse_relations(text, &builtin());
        assert_eq!(parsed.len(), 1);
        let rel = parsed[0].recognized().expect("fragment should be recognized");
        assert_eq!(rel.kind, kind);
        assert_eq!(rel.target, unit(target));
    }

    #[rstest]
    #[case("1002", UnparseReason::TooFewTokens)]
    #[case("Copre", UnparseReason::TooFewTokens)]
    #[case("Sotto 1002", UnparseReason::UnknownPhrase("Sotto".into()))]
    #[case("Copre il muro", UnparseReason::UnknownPhrase("Copre il".into()))]
    #[case("Copre ???", UnparseReason::InvalidTarget("???".into()))]
    fn test_parse_invalid_fragment(#[case] text: &str, #[case] reason: UnparseReason) {
        let parsed = parse_relations(text, &builtin());
        assert_eq!(parsed, vec![ParsedFragment::Unparsable(UnparsableFragment {
            fragment: text.to_string(),
            reason,
        })]);
    }

    #[test]
    fn test_bad_fragment_does_not_abort_others() {
        let parsed = parse_relations("Copre 1, Sotto 2, , Taglia 3,", &builtin());
        assert_eq!(parsed.len(), 3);
        assert!(parsed[0].recognized().is_some());
        assert!(parsed[1].recognized().is_none());
        assert_eq!(parsed[2].recognized().map(|r| r.kind), Some(RelationKind::Cuts));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(" , ,")]
    fn test_empty_input(#[case] text: &str) {
        assert!(parse_relations(text, &builtin()).is_empty());
    }
}
