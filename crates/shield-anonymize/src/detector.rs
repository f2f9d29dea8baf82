//! Span detection.
//!
//! The [`SpanDetector`] trait is the seam between the anonymization engine
//! and whatever entity-recognition backend produces spans. The built-in
//! [`PatternDetector`] covers the standard entity types with regex patterns
//! plus a context-keyword confidence booster, and accepts additional
//! [`CustomRecognizer`]s at runtime.

use std::collections::HashSet;

use regex::Regex;
use shield_core::{DetectionError, EntityType, Span};

use crate::recognizer::CustomRecognizer;

/// Confidence boost granted by a custom recognizer's context words.
const CUSTOM_CONTEXT_BOOST: f64 = 0.1;

/// Detects PII spans in a document.
///
/// Implementations return every candidate span regardless of score —
/// threshold filtering belongs to the anonymization engine, so callers can
/// report total-detected and above-threshold counts separately. Returned
/// spans must be non-overlapping and carry valid offsets into the text.
pub trait SpanDetector {
    /// Analyzes `text` for the requested entity types.
    ///
    /// # Errors
    /// [`DetectionError`] when the detection backend fails. No partial
    /// results are returned on failure.
    fn analyze(
        &self,
        text: &str,
        entity_types: &HashSet<EntityType>,
        language: &str,
    ) -> Result<Vec<Span>, DetectionError>;
}

/// Detector configuration.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Bytes scanned before a match for context keywords.
    pub context_window: usize,
    /// Cap on the cumulative context confidence boost.
    pub context_boost_cap: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            context_window: 50,
            context_boost_cap: 0.3,
        }
    }
}

struct EntityPattern {
    name: String,
    entity_type: EntityType,
    regex: Regex,
    score: f64,
}

struct ContextKeyword {
    keyword: String,
    entity_type: EntityType,
    boost: f64,
}

/// Regex-based span detector with built-in patterns for the standard entity
/// types.
///
/// `PERSON` uses a capitalized-name heuristic whose confidence rises when
/// context keywords ("customer", an honorific, ...) appear shortly before
/// the match. The other standard types are plain pattern matches.
pub struct PatternDetector {
    patterns: Vec<EntityPattern>,
    keywords: Vec<ContextKeyword>,
    config: DetectorConfig,
}

impl PatternDetector {
    /// Creates a detector with default configuration and built-in patterns.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Creates with custom configuration.
    #[must_use]
    pub fn with_config(config: DetectorConfig) -> Self {
        let mut detector = Self {
            patterns: Vec::new(),
            keywords: Vec::new(),
            config,
        };
        detector.add_builtin_patterns();
        detector.add_builtin_keywords();
        detector
    }

    fn add_builtin_patterns(&mut self) {
        for entity_type in EntityType::standard_set() {
            match entity_type.as_str() {
                "EMAIL_ADDRESS" => {
                    self.add_pattern(
                        "email",
                        &entity_type,
                        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
                        0.95,
                    );
                }
                "PHONE_NUMBER" => {
                    self.add_pattern(
                        "phone_us",
                        &entity_type,
                        r"(?:\+1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
                        0.85,
                    );
                    self.add_pattern(
                        "phone_us_local",
                        &entity_type,
                        r"\b[0-9]{3}[-.][0-9]{4}\b",
                        0.7,
                    );
                    self.add_pattern("phone_intl", &entity_type, r"\+[1-9][0-9]{6,14}", 0.8);
                }
                "URL" => {
                    self.add_pattern("url", &entity_type, r#"https?://[^\s<>"']+"#, 0.9);
                }
                "IP_ADDRESS" => {
                    self.add_pattern(
                        "ipv4",
                        &entity_type,
                        r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b",
                        0.95,
                    );
                    self.add_pattern(
                        "ipv6",
                        &entity_type,
                        r"\b(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\b",
                        0.95,
                    );
                }
                "PERSON" => {
                    self.add_pattern(
                        "person_name",
                        &entity_type,
                        r"\b[A-Z][a-z]+(?: [A-Z]\.?)? [A-Z][a-z]+\b",
                        0.65,
                    );
                }
                _ => {}
            }
        }
    }

    fn add_builtin_keywords(&mut self) {
        for entity_type in EntityType::standard_set() {
            match entity_type.as_str() {
                "PERSON" => {
                    for keyword in ["customer", "name", "mr.", "ms.", "mrs.", "dr.", "attn"] {
                        self.add_keyword(keyword, &entity_type, 0.2);
                    }
                }
                "PHONE_NUMBER" => {
                    for keyword in ["phone", "call", "tel", "mobile"] {
                        self.add_keyword(keyword, &entity_type, 0.1);
                    }
                }
                "EMAIL_ADDRESS" => {
                    for keyword in ["email", "e-mail"] {
                        self.add_keyword(keyword, &entity_type, 0.05);
                    }
                }
                _ => {}
            }
        }
    }

    fn add_pattern(&mut self, name: &str, entity_type: &EntityType, pattern: &str, score: f64) {
        match Regex::new(pattern) {
            Ok(regex) => self.patterns.push(EntityPattern {
                name: name.to_string(),
                entity_type: entity_type.clone(),
                regex,
                score,
            }),
            Err(e) => {
                tracing::warn!("failed to compile pattern '{name}': {e}");
            }
        }
    }

    fn add_keyword(&mut self, keyword: &str, entity_type: &EntityType, boost: f64) {
        self.keywords.push(ContextKeyword {
            keyword: keyword.to_lowercase(),
            entity_type: entity_type.clone(),
            boost,
        });
    }

    /// Registers a custom recognizer.
    ///
    /// Its patterns join the detector's pattern set under the recognizer's
    /// entity type; its context words become confidence-boost keywords.
    pub fn register(&mut self, recognizer: CustomRecognizer) {
        let (entity_type, patterns, context, score) = recognizer.into_parts();
        for (i, regex) in patterns.into_iter().enumerate() {
            self.patterns.push(EntityPattern {
                name: format!("{}_{i}", entity_type.as_str().to_lowercase()),
                entity_type: entity_type.clone(),
                regex,
                score,
            });
        }
        for word in context {
            self.add_keyword(&word, &entity_type, CUSTOM_CONTEXT_BOOST);
        }
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Cumulative keyword boost for a match, scanning the window before it.
    fn context_boost(&self, text: &str, start: usize, entity_type: &EntityType) -> f64 {
        let mut window_start = start.saturating_sub(self.config.context_window);
        while !text.is_char_boundary(window_start) {
            window_start -= 1;
        }
        let before = text[window_start..start].to_lowercase();

        let mut boost = 0.0;
        for keyword in &self.keywords {
            if keyword.entity_type == *entity_type && before.contains(&keyword.keyword) {
                boost += keyword.boost;
            }
        }
        boost.min(self.config.context_boost_cap)
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanDetector for PatternDetector {
    fn analyze(
        &self,
        text: &str,
        entity_types: &HashSet<EntityType>,
        language: &str,
    ) -> Result<Vec<Span>, DetectionError> {
        tracing::debug!(language, requested = entity_types.len(), "analyzing document");

        let mut candidates = Vec::new();
        for pattern in &self.patterns {
            if !entity_types.contains(&pattern.entity_type) {
                continue;
            }
            for m in pattern.regex.find_iter(text) {
                let score = pattern.score + self.context_boost(text, m.start(), &pattern.entity_type);
                candidates.push(Span::new(
                    pattern.entity_type.clone(),
                    m.start(),
                    m.end(),
                    score.min(1.0),
                ));
            }
            tracing::trace!(pattern = %pattern.name, "pattern scanned");
        }

        let spans = resolve_overlaps(candidates);
        tracing::debug!(detected = spans.len(), "detection complete");
        Ok(spans)
    }
}

/// Resolves overlapping candidates.
///
/// The longer span wins; ties go to the higher score, then to the earlier
/// start. A phone number embedded inside a longer custom-entity match is
/// subsumed by the more specific match.
fn resolve_overlaps(mut candidates: Vec<Span>) -> Vec<Span> {
    candidates.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| a.start.cmp(&b.start))
    });

    let mut kept: Vec<Span> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if kept.iter().all(|existing| !existing.overlaps(&candidate)) {
            kept.push(candidate);
        }
    }
    kept.sort_by_key(|span| span.start);
    kept
}
