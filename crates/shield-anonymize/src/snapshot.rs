//! Mapping snapshot persistence.
//!
//! A snapshot serializes one anonymization pass — the mapping table plus
//! its detection statistics — so a later process can restore the document
//! or audit what was detected without re-running detection.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shield_core::{AnalyzedEntity, PersistenceError};

use crate::anonymizer::AnonymizedDocument;
use crate::mapping::EntityMappingStore;

/// JSON snapshot of one anonymization pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingSnapshot {
    /// Entity type → original value → placeholder token.
    pub mappings: EntityMappingStore,
    /// Detections at or above the threshold.
    pub analyzed_entities: Vec<AnalyzedEntity>,
    /// Pass statistics.
    pub metadata: SnapshotMetadata,
}

/// Statistics describing the pass that produced a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// The confidence threshold the pass filtered with.
    pub min_score_threshold: f64,
    /// All detections, including those below the threshold.
    pub total_entities_detected: usize,
    /// Detections that met the threshold. Always equals
    /// `analyzed_entities.len()`.
    pub entities_above_threshold: usize,
}

impl MappingSnapshot {
    /// Captures the state of a finished anonymization pass.
    #[must_use]
    pub fn capture(
        store: &EntityMappingStore,
        document: &AnonymizedDocument,
        min_score_threshold: f64,
    ) -> Self {
        Self {
            mappings: store.clone(),
            analyzed_entities: document.analyzed_entities.clone(),
            metadata: SnapshotMetadata {
                min_score_threshold,
                total_entities_detected: document.total_detected(),
                entities_above_threshold: document.analyzed_entities.len(),
            },
        }
    }

    /// Reconstructs a mapping store equivalent to the captured one: every
    /// `reverse_lookup` that succeeded before the round trip succeeds after
    /// it with the same result.
    #[must_use]
    pub fn into_store(self) -> EntityMappingStore {
        self.mappings
    }

    /// Writes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    /// [`PersistenceError`] on encode or IO failure.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|source| PersistenceError::Encode { source })?;
        fs::write(path, json).map_err(|source| PersistenceError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Reads a snapshot, verifying its metadata invariants.
    ///
    /// # Errors
    /// [`PersistenceError`] when the file is unreadable, not valid snapshot
    /// JSON, or internally inconsistent.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let content = fs::read_to_string(path).map_err(|source| PersistenceError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot: Self =
            serde_json::from_str(&content).map_err(|source| PersistenceError::Malformed {
                path: path.display().to_string(),
                source,
            })?;
        snapshot.check_consistency(path)?;
        Ok(snapshot)
    }

    /// Reads a snapshot, falling back to an empty one when the file is
    /// missing, malformed, or inconsistent.
    ///
    /// The failure is logged rather than propagated: the mapping file is
    /// optional external configuration and must not crash the caller.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("falling back to an empty mapping: {e}");
                Self::default()
            }
        }
    }

    fn check_consistency(&self, path: &Path) -> Result<(), PersistenceError> {
        let above = self.metadata.entities_above_threshold;
        if above != self.analyzed_entities.len() {
            return Err(PersistenceError::Inconsistent {
                path: path.display().to_string(),
                reason: format!(
                    "entities_above_threshold is {above} but {} analyzed entities are listed",
                    self.analyzed_entities.len()
                ),
            });
        }
        if above > self.metadata.total_entities_detected {
            return Err(PersistenceError::Inconsistent {
                path: path.display().to_string(),
                reason: format!(
                    "entities_above_threshold {above} exceeds total_entities_detected {}",
                    self.metadata.total_entities_detected
                ),
            });
        }
        Ok(())
    }
}
