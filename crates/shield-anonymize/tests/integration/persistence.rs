//! Snapshot persistence integration tests.

use std::fs;

use crate::common;
use shield_anonymize::{EntityMappingStore, MappingSnapshot};
use shield_core::PersistenceError;

fn snapshot_for(text: &str) -> MappingSnapshot {
    let anonymizer = common::default_anonymizer();
    let mut store = EntityMappingStore::new();
    let document = anonymizer.anonymize(text, &mut store).unwrap();
    MappingSnapshot::capture(&store, &document, 0.6)
}

/// Tests the persisted JSON exposes the documented schema fields.
#[test]
fn test_snapshot_schema() {
    let snapshot = snapshot_for(common::SAMPLE_TICKET);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapping.json");
    snapshot.save(&path).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert!(raw.get("mappings").is_some());
    assert!(raw.get("analyzed_entities").is_some());
    let metadata = raw.get("metadata").unwrap();
    assert!(metadata.get("min_score_threshold").is_some());
    assert!(metadata.get("total_entities_detected").is_some());
    assert!(metadata.get("entities_above_threshold").is_some());

    let above = metadata["entities_above_threshold"].as_u64().unwrap();
    assert_eq!(above, raw["analyzed_entities"].as_array().unwrap().len() as u64);
    assert!(above <= metadata["total_entities_detected"].as_u64().unwrap());
}

/// Tests a snapshot read back from disk equals the one written.
#[test]
fn test_snapshot_round_trip_equality() {
    let snapshot = snapshot_for(common::REPEATED_PII_TICKET);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapping.json");
    snapshot.save(&path).unwrap();

    assert_eq!(MappingSnapshot::load(&path).unwrap(), snapshot);
}

/// Tests graceful degradation: a missing or corrupt file yields an empty
/// snapshot instead of an error.
#[test]
fn test_load_or_default_degrades_gracefully() {
    let dir = tempfile::tempdir().unwrap();

    let from_missing = MappingSnapshot::load_or_default(&dir.path().join("absent.json"));
    assert!(from_missing.mappings.is_empty());

    let corrupt = dir.path().join("corrupt.json");
    fs::write(&corrupt, "]{[").unwrap();
    let from_corrupt = MappingSnapshot::load_or_default(&corrupt);
    assert!(from_corrupt.mappings.is_empty());
}

/// Tests strict loading surfaces each failure class distinctly.
#[test]
fn test_load_failure_classes() {
    let dir = tempfile::tempdir().unwrap();

    let missing = MappingSnapshot::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, PersistenceError::Read { .. }));

    let corrupt = dir.path().join("corrupt.json");
    fs::write(&corrupt, "]{[").unwrap();
    let malformed = MappingSnapshot::load(&corrupt).unwrap_err();
    assert!(matches!(malformed, PersistenceError::Malformed { .. }));
}
