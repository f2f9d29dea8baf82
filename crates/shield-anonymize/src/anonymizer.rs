//! Anonymization engine.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shield_core::{AnalyzedEntity, DetectionError, EntityType, ShieldResult, Span, ValidationError};

use crate::detector::{PatternDetector, SpanDetector};
use crate::mapping::EntityMappingStore;

/// Anonymizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Entity types to detect. Defaults to the standard set.
    pub entity_types: Vec<EntityType>,
    /// Minimum confidence a span needs to be anonymized.
    pub min_score_threshold: f64,
    /// Language hint passed to the detector.
    pub language: String,
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            entity_types: EntityType::standard_set(),
            min_score_threshold: 0.6,
            language: "en".to_string(),
        }
    }
}

/// One applied replacement, recorded in document order with offsets into
/// the original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedSubstitution {
    /// Entity type of the replaced span.
    pub entity_type: EntityType,
    /// The placeholder token written into the output.
    pub token: String,
    /// Start byte offset in the original text.
    pub start: usize,
    /// End byte offset in the original text.
    pub end: usize,
}

/// The anonymized text plus everything needed to reverse it or persist the
/// pass without re-running detection.
#[derive(Debug, Clone)]
pub struct AnonymizedDocument {
    /// The anonymized text.
    pub text: String,
    /// Applied substitutions, ordered by document position.
    pub substitutions: Vec<AppliedSubstitution>,
    /// Detections at or above the threshold, in document order.
    pub analyzed_entities: Vec<AnalyzedEntity>,
    /// Every detection, including those filtered out, in document order.
    /// Offsets index into the original text.
    pub detected_spans: Vec<Span>,
}

impl AnonymizedDocument {
    /// Count of all detections, including those filtered out.
    #[must_use]
    pub fn total_detected(&self) -> usize {
        self.detected_spans.len()
    }

    /// Count of detections that met the threshold.
    #[must_use]
    pub fn above_threshold(&self) -> usize {
        self.analyzed_entities.len()
    }
}

/// Anonymization engine: detects spans, filters by confidence, assigns
/// placeholder tokens through a caller-owned [`EntityMappingStore`], and
/// rewrites the document.
pub struct Anonymizer {
    detector: Box<dyn SpanDetector>,
    config: AnonymizerConfig,
}

impl Anonymizer {
    /// Creates an anonymizer around a detector.
    #[must_use]
    pub fn new(config: AnonymizerConfig, detector: Box<dyn SpanDetector>) -> Self {
        Self { detector, config }
    }

    /// Creates with the default configuration and the built-in
    /// [`PatternDetector`].
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(AnonymizerConfig::default(), Box::new(PatternDetector::new()))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AnonymizerConfig {
        &self.config
    }

    /// Anonymizes `text`, recording assignments in `store`.
    ///
    /// Detection runs over the full requested type set before any filtering,
    /// so total-detected and above-threshold counts stay separately
    /// reportable. Tokens are assigned in document order (counters reflect
    /// first sight; repeated literal values reuse their token), then
    /// replacements are applied right-to-left against original offsets so
    /// earlier offsets stay valid.
    ///
    /// The store mutates only after the whole detection pass validates: a
    /// detection failure leaves it untouched.
    ///
    /// # Errors
    /// [`ValidationError`] when the configured entity type set is empty;
    /// [`DetectionError`] when the detector fails or produces offsets
    /// outside the document.
    pub fn anonymize(
        &self,
        text: &str,
        store: &mut EntityMappingStore,
    ) -> ShieldResult<AnonymizedDocument> {
        if self.config.entity_types.is_empty() {
            return Err(ValidationError::RequiredField("entity_types".to_string()).into());
        }

        let requested: HashSet<EntityType> = self.config.entity_types.iter().cloned().collect();
        let mut detected_spans = self
            .detector
            .analyze(text, &requested, &self.config.language)?;
        detected_spans.sort_by_key(|span| span.start);

        let surviving: Vec<&Span> = detected_spans
            .iter()
            .filter(|span| span.score >= self.config.min_score_threshold)
            .collect();
        tracing::debug!(
            total_detected = detected_spans.len(),
            above_threshold = surviving.len(),
            "filtered detections"
        );

        // Validate every span before the first assignment so a bad span
        // cannot leave the store partially mutated.
        let mut originals = Vec::with_capacity(surviving.len());
        for span in &surviving {
            let original = span.slice(text).ok_or_else(|| DetectionError::InvalidSpan {
                entity_type: span.entity_type.as_str().to_string(),
                start: span.start,
                end: span.end,
            })?;
            originals.push(original);
        }

        let mut substitutions = Vec::with_capacity(surviving.len());
        let mut analyzed_entities = Vec::with_capacity(surviving.len());
        for (span, original) in surviving.iter().zip(&originals) {
            let token = store.assign(&span.entity_type, original);
            analyzed_entities.push(AnalyzedEntity {
                entity_type: span.entity_type.clone(),
                entity_text: (*original).to_string(),
                score: span.score,
            });
            substitutions.push(AppliedSubstitution {
                entity_type: span.entity_type.clone(),
                token,
                start: span.start,
                end: span.end,
            });
        }

        let mut out = text.to_string();
        for substitution in substitutions.iter().rev() {
            out.replace_range(substitution.start..substitution.end, &substitution.token);
        }

        Ok(AnonymizedDocument {
            text: out,
            substitutions,
            analyzed_entities,
            detected_spans,
        })
    }
}
