//! Stratigraphic relationship engine.
//!
//! Derives a Harris matrix from the free-text relationship fields of
//! excavation units (US). Relationship text is parsed into typed relations,
//! checked for bidirectional consistency and contradictions, and ordered into
//! layers for rendering or export.
//!
//! ```
//! use harris_matrix_core::{Scope, StratigraphicEngine, UnitKind, UnitNumber, UnitRecord};
//!
//! let scope = Scope::new("Pompei", "1");
//! let unit = |n: &str, text: &str| {
//!     UnitRecord::new(&scope, UnitNumber::parse(n).unwrap(), UnitKind::Layer, text)
//! };
//! let units = vec![unit("1000", "Copre 1002"), unit("1002", "Coperto da 1000")];
//!
//! let matrix = StratigraphicEngine::default().generate(&scope, &units);
//! assert_eq!(matrix.layers.len(), 2);
//! assert!(matrix.diagnostics.is_empty());
//! ```

pub mod analysis;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod parser;
pub mod store;
pub mod validation;
pub mod vocabulary;

pub use config::EngineConfig;
pub use engine::StratigraphicEngine;
pub use error::{EngineError, EngineResult};
pub use matrix::{HarrisMatrix, LateralLink, OrderLink};
pub use parser::{parse_relations, ParsedFragment, RecognizedRelation, UnparsableFragment};
pub use store::{Scope, UnitKind, UnitNumber, UnitRecord};
pub use validation::{Diagnostic, DiagnosticKind, Propagation};
pub use vocabulary::{is_contradictory, Lexicon, LexiconEntry, OrderingClass, RelationKind};
