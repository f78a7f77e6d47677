//! Clause library

use crate::error::DraftingError;
use serde::Serialize;
use serde_yaml::Value;
use std::path::Path;
use tracing::{debug, warn};

/// A reusable clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    /// Library key, e.g. `governing_law`
    pub key: String,
    /// Clause text
    pub text: String,
}

impl Clause {
    fn new(key: &str, text: &str) -> Self {
        Self {
            key: key.to_string(),
            text: text.to_string(),
        }
    }
}

/// Ordered, validated collection of clauses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseLibrary {
    clauses: Vec<Clause>,
}

impl ClauseLibrary {
    /// The minimal library used when no file is available
    pub fn builtin() -> Self {
        Self {
            clauses: vec![
                Clause::new(
                    "confidentiality",
                    "Each party shall keep confidential any proprietary information...",
                ),
                Clause::new(
                    "governing_law",
                    "This Agreement shall be governed by the laws of [Jurisdiction].",
                ),
                Clause::new(
                    "limitation_of_liability",
                    "In no event shall either party be liable for indirect, incidental, special, or consequential damages...",
                ),
            ],
        }
    }

    /// Parse a YAML (or JSON) mapping of clause keys to clause text.
    ///
    /// Order follows the document. An empty document yields `Ok(None)`.
    pub fn from_yaml_str(contents: &str) -> Result<Option<Self>, DraftingError> {
        let root: Value =
            serde_yaml::from_str(contents).map_err(|e| DraftingError::Parse(e.to_string()))?;

        let mapping = match root {
            Value::Null => return Ok(None),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(DraftingError::MalformedLibrary(
                    "root must be a mapping of clause keys to text".to_string(),
                ))
            }
        };

        let clauses = mapping
            .iter()
            .map(|(key, text)| match (key.as_str(), text.as_str()) {
                (Some(key), Some(text)) => Ok(Clause::new(key, text)),
                (None, _) => Err(DraftingError::MalformedLibrary(format!(
                    "clause key {:?} is not a string",
                    key
                ))),
                (Some(key), None) => Err(DraftingError::MalformedLibrary(format!(
                    "clause '{}' text is not a string",
                    key
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Self { clauses }))
    }

    /// Load a clause library file.
    ///
    /// A missing, unreadable, unparseable or empty file falls back to
    /// [`ClauseLibrary::builtin`] with a warning. A file that parses but has
    /// the wrong shape is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DraftingError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Clause library {} not found, using built-in clauses", path.display());
            return Ok(Self::builtin());
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read clause library {}: {}", path.display(), e);
                return Ok(Self::builtin());
            }
        };

        match Self::from_yaml_str(&contents) {
            Ok(Some(library)) => {
                debug!("Loaded {} clauses from {}", library.len(), path.display());
                Ok(library)
            }
            Ok(None) => {
                warn!("Clause library {} is empty, using built-in clauses", path.display());
                Ok(Self::builtin())
            }
            Err(DraftingError::Parse(e)) => {
                warn!("Failed to parse clause library {}: {}", path.display(), e);
                Ok(Self::builtin())
            }
            Err(e) => Err(e),
        }
    }

    /// Number of clauses
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the library has no clauses
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Look up a clause by key
    pub fn get(&self, key: &str) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.key == key)
    }

    /// All clauses in library order
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Pick clauses for a draft.
    ///
    /// No request (or an empty one) selects the whole library. Otherwise the
    /// requested keys are returned in library order; unknown keys are ignored.
    pub fn select(&self, requested: Option<&[String]>) -> Vec<Clause> {
        match requested {
            None | Some([]) => self.clauses.clone(),
            Some(keys) => self
                .clauses
                .iter()
                .filter(|c| keys.iter().any(|k| *k == c.key))
                .cloned()
                .collect(),
        }
    }
}

impl Default for ClauseLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}
