//! Errors returned by fallible API calls.
//!
//! Problems found *in the data* (unparsable text, cycles, contradictions)
//! are never errors; they are reported as [`Diagnostic`](crate::validation::Diagnostic)s.
use crate::vocabulary::RelationKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to read configuration '{}': {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Lexicon entry has an empty phrase")]
    EmptyPhrase,
    #[error("Lexicon phrase '{phrase}' maps to both {first} and {second}")]
    ConflictingPhrase { phrase: String, first: RelationKind, second: RelationKind },
    #[error("Lexicon has no phrase for relation kind {0}")]
    MissingPhrase(RelationKind),
    #[error("'{0}' is not a valid unit identifier")]
    InvalidUnitNumber(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
