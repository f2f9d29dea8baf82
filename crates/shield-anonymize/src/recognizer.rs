//! Custom entity recognizers.
//!
//! Definitions arrive as externally generated records — for example the
//! output of an LLM pattern-synthesis step — carrying an uppercase entity
//! name, one or more regex patterns, optional context words, and a base
//! confidence score. Malformed records are skipped with a reported error;
//! the rest of the batch still loads.

use regex::Regex;
use serde::{Deserialize, Serialize};
use shield_core::{EntityType, RecognizerError};

/// An externally supplied custom entity definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerDefinition {
    /// Entity type name, uppercase.
    pub entity_name: String,
    /// Regex patterns matching the entity.
    pub patterns: Vec<String>,
    /// Context words that boost confidence when seen near a match.
    #[serde(default)]
    pub context: Vec<String>,
    /// Base confidence score in `[0, 1]`.
    pub score: f64,
}

/// A validated, compiled custom recognizer ready to register with a
/// [`crate::PatternDetector`].
#[derive(Debug)]
pub struct CustomRecognizer {
    entity_type: EntityType,
    patterns: Vec<Regex>,
    context: Vec<String>,
    score: f64,
}

impl CustomRecognizer {
    /// Compiles a definition, validating every field.
    ///
    /// # Errors
    /// [`RecognizerError`] naming the definition when the entity name is not
    /// uppercase, the score is outside `[0, 1]`, no patterns are given, or a
    /// pattern fails to compile.
    pub fn compile(definition: &RecognizerDefinition) -> Result<Self, RecognizerError> {
        let entity_type =
            EntityType::new(definition.entity_name.clone()).map_err(|_| RecognizerError::InvalidName {
                entity_name: definition.entity_name.clone(),
            })?;

        if !(0.0..=1.0).contains(&definition.score) {
            return Err(RecognizerError::ScoreOutOfRange {
                entity_name: definition.entity_name.clone(),
                score: definition.score,
            });
        }

        if definition.patterns.is_empty() {
            return Err(RecognizerError::EmptyPatterns {
                entity_name: definition.entity_name.clone(),
            });
        }

        let mut patterns = Vec::with_capacity(definition.patterns.len());
        for pattern in &definition.patterns {
            let regex = Regex::new(pattern).map_err(|e| RecognizerError::BadPattern {
                entity_name: definition.entity_name.clone(),
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            patterns.push(regex);
        }

        Ok(Self {
            entity_type,
            patterns,
            context: definition.context.clone(),
            score: definition.score,
        })
    }

    /// The entity type this recognizer detects.
    #[must_use]
    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    /// The base confidence score.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub(crate) fn into_parts(self) -> (EntityType, Vec<Regex>, Vec<String>, f64) {
        (self.entity_type, self.patterns, self.context, self.score)
    }
}

/// Compiles a batch of definitions, skipping malformed entries.
///
/// Returns the recognizers that compiled and the errors for those that did
/// not; a malformed entry never fails the batch.
pub fn build_recognizers(
    definitions: &[RecognizerDefinition],
) -> (Vec<CustomRecognizer>, Vec<RecognizerError>) {
    let mut built = Vec::with_capacity(definitions.len());
    let mut failures = Vec::new();

    for definition in definitions {
        match CustomRecognizer::compile(definition) {
            Ok(recognizer) => built.push(recognizer),
            Err(e) => {
                tracing::warn!("skipping custom recognizer: {e}");
                failures.push(e);
            }
        }
    }

    (built, failures)
}
