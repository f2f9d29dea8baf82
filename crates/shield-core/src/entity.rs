//! Entity types and detected spans.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The entity types detected out of the box.
pub const STANDARD_ENTITY_TYPES: [&str; 5] = [
    "PERSON",
    "PHONE_NUMBER",
    "EMAIL_ADDRESS",
    "URL",
    "IP_ADDRESS",
];

/// An entity type name: uppercase ASCII letters and underscores.
///
/// Entity types are open-ended — custom recognizers introduce new ones at
/// runtime — so this is a validated newtype rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    /// Creates an entity type, validating the name.
    ///
    /// # Errors
    /// Returns [`ValidationError`] if the name is empty, does not start with
    /// an uppercase letter, or contains characters outside `[A-Z_]`.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::RequiredField("entity_type".to_string()));
        }
        let valid = name.starts_with(|c: char| c.is_ascii_uppercase())
            && name.chars().all(|c| c.is_ascii_uppercase() || c == '_');
        if !valid {
            return Err(ValidationError::InvalidEntityType(name));
        }
        Ok(Self(name))
    }

    /// Returns the type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the standard entity type set.
    #[must_use]
    pub fn standard_set() -> Vec<Self> {
        STANDARD_ENTITY_TYPES
            .iter()
            .map(|name| Self((*name).to_string()))
            .collect()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A detected PII occurrence: entity type, byte offsets, confidence score.
///
/// Offsets index into the analyzed document; the invariant is
/// `0 <= start < end <= text.len()` with both offsets on UTF-8 boundaries.
/// Spans are produced by a detector and live for one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The detected entity type.
    pub entity_type: EntityType,
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Detector confidence in `[0.0, 1.0]`.
    pub score: f64,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub fn new(entity_type: EntityType, start: usize, end: usize, score: f64) -> Self {
        Self {
            entity_type,
            start,
            end,
            score,
        }
    }

    /// Checked slice of the text this span covers.
    ///
    /// Returns `None` when the offsets are empty, fall outside the text, or
    /// land off a UTF-8 boundary.
    #[must_use]
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        if self.start >= self.end {
            return None;
        }
        text.get(self.start..self.end)
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True for degenerate spans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when this span shares any byte with `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A detection that survived threshold filtering, as persisted in mapping
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedEntity {
    /// The detected entity type.
    pub entity_type: EntityType,
    /// The literal text of the detection.
    pub entity_text: String,
    /// Detector confidence.
    pub score: f64,
}
