//! Dotted-path patching of invoice documents
//!
//! A patch sets a single field, addressed by a path such as
//! `dates.issue_date`, to a JSON value. Intermediate objects are created when
//! missing. What happens when an intermediate exists but is not an object is
//! governed by [`PatchMode`]:
//!
//! - [`PatchMode::Lenient`] (default) replaces it with an empty object,
//!   discarding the previous value, and logs a warning.
//! - [`PatchMode::Strict`] rejects the patch with
//!   [`InvoiceError::PathConflict`].

use crate::core::error::InvoiceError;
use crate::core::record::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A validated path of one or more non-empty, `.`-separated segments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DottedPath {
    parents: Vec<String>,
    leaf: String,
}

impl DottedPath {
    /// Parse a dotted path, rejecting empty paths and empty segments
    /// (leading, trailing or consecutive dots)
    pub fn parse(path: &str) -> Result<Self, InvoiceError> {
        if path.is_empty() {
            return Err(InvoiceError::invalid_path(path, "path is empty"));
        }

        let mut parents: Vec<String> = path.split('.').map(str::to_string).collect();
        if let Some(position) = parents.iter().position(String::is_empty) {
            return Err(InvoiceError::invalid_path(
                path,
                format!("empty segment at position {}", position + 1),
            ));
        }

        match parents.pop() {
            Some(leaf) => Ok(Self { parents, leaf }),
            None => Err(InvoiceError::invalid_path(path, "path is empty")),
        }
    }

    /// All segments, root first
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.parents
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.leaf.as_str()))
    }

    /// Segments walked before the leaf
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// The segment the value is written to
    pub fn leaf(&self) -> &str {
        &self.leaf
    }
}

impl FromStr for DottedPath {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for parent in &self.parents {
            write!(f, "{}.", parent)?;
        }
        f.write_str(&self.leaf)
    }
}

/// Policy for intermediates that exist but are not objects
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchMode {
    /// Overwrite the intermediate with an empty object
    #[default]
    Lenient,
    /// Refuse the patch
    Strict,
}

impl FromStr for PatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(PatchMode::Lenient),
            "strict" => Ok(PatchMode::Strict),
            other => Err(format!("unknown patch mode '{}'", other)),
        }
    }
}

/// Applies dotted-path mutations to documents
#[derive(Clone, Copy, Debug, Default)]
pub struct PatchEngine {
    mode: PatchMode,
}

impl PatchEngine {
    pub fn new(mode: PatchMode) -> Self {
        Self { mode }
    }

    pub fn strict() -> Self {
        Self::new(PatchMode::Strict)
    }

    pub fn mode(&self) -> PatchMode {
        self.mode
    }

    /// Set the field at `path` to `value` and return the mutated document
    ///
    /// The value is stored verbatim, without coercion. On error the input
    /// document is dropped; callers keep their own copy if they need it.
    pub fn apply(
        &self,
        mut document: Document,
        path: &DottedPath,
        value: Value,
    ) -> Result<Document, InvoiceError> {
        let mut current = &mut document;
        for segment in path.parents() {
            current = self.descend(current, segment, path)?;
        }
        current.insert(path.leaf().to_string(), value);

        Ok(document)
    }

    /// Read the value at `path`, if every segment resolves
    pub fn read<'a>(&self, document: &'a Document, path: &DottedPath) -> Option<&'a Value> {
        let mut current = document;
        for segment in path.parents() {
            current = current.get(segment)?.as_object()?;
        }
        current.get(path.leaf())
    }

    fn descend<'a>(
        &self,
        current: &'a mut Map<String, Value>,
        segment: &str,
        path: &DottedPath,
    ) -> Result<&'a mut Map<String, Value>, InvoiceError> {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if !slot.is_object() {
            if self.mode == PatchMode::Strict {
                return Err(conflict(path, segment));
            }
            tracing::warn!(
                path = %path,
                segment,
                discarded = %slot,
                "overwriting non-object intermediate with an empty object"
            );
            *slot = Value::Object(Map::new());
        }

        slot.as_object_mut().ok_or_else(|| conflict(path, segment))
    }
}

fn conflict(path: &DottedPath, segment: &str) -> InvoiceError {
    InvoiceError::PathConflict {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}
