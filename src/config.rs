//! Engine configuration, loadable from JSON.
//!
//! ```json
//! {
//!   "report_missing_inverse": true,
//!   "infer_inverse_through_equivalence": true,
//!   "extend_builtin_lexicon": true,
//!   "lexicon": [
//!     { "phrase": "recouvre", "kind": "Covers", "preferred": true },
//!     { "phrase": "recouvert par", "kind": "CoveredBy" }
//!   ]
//! }
//! ```

use crate::error::{EngineError, EngineResult};
use crate::vocabulary::lexicon::builtin;
use crate::vocabulary::{Lexicon, LexiconEntry};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub lexicon: Lexicon,
    /// Emit `MissingInverse` findings. Archives that only record one side of
    /// each relation switch this off to keep reports readable.
    pub report_missing_inverse: bool,
    /// Accept an inverse stated by any unit equal to the target.
    pub infer_inverse_through_equivalence: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lexicon: builtin(),
            report_missing_inverse: true,
            infer_inverse_through_equivalence: true,
        }
    }
}

/// On-disk shape of the configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    lexicon: Vec<LexiconEntry>,
    #[serde(default)]
    extend_builtin_lexicon: bool,
    #[serde(default = "default_true")]
    report_missing_inverse: bool,
    #[serde(default = "default_true")]
    infer_inverse_through_equivalence: bool,
}

fn default_true() -> bool { true }

impl EngineConfig {
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon, ..Default::default() }
    }

    /// Parses a JSON configuration.
    ///
    /// Without `lexicon` entries the built-in lexicon is used. With entries,
    /// they replace the built-in one unless `extend_builtin_lexicon` is set.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;

        let lexicon = if file.lexicon.is_empty() {
            builtin()
        } else {
            let custom = Lexicon::from_entries(&file.lexicon)?;
            if file.extend_builtin_lexicon { custom.merge(&builtin())? } else { custom }
        };

        Ok(Self {
            lexicon,
            report_missing_inverse: file.report_missing_inverse,
            infer_inverse_through_equivalence: file.infer_inverse_through_equivalence,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| EngineError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&json)
    }
}
