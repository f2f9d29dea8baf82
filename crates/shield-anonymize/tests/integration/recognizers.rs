//! Custom recognizer integration tests.

use shield_anonymize::{
    build_recognizers, Anonymizer, AnonymizerConfig, Deanonymizer, EntityMappingStore,
    PatternDetector, RecognizerDefinition,
};
use shield_core::EntityType;

fn definitions() -> Vec<RecognizerDefinition> {
    serde_json::from_str(
        r#"[
            {
                "entity_name": "ACCOUNT_NUMBER",
                "patterns": ["ACC\\d{6}"],
                "context": ["account"],
                "score": 0.8
            },
            {
                "entity_name": "EMPLOYEE_ID",
                "patterns": ["EMP-\\d{4}-\\d{3}"],
                "context": ["employee"],
                "score": 0.85
            },
            {
                "entity_name": "broken because lowercase",
                "patterns": ["\\d+"],
                "score": 0.5
            }
        ]"#,
    )
    .unwrap()
}

/// Tests that the malformed definition is skipped while the rest load.
#[test]
fn test_batch_reports_failures() {
    let (built, failures) = build_recognizers(&definitions());

    assert_eq!(built.len(), 2);
    assert_eq!(failures.len(), 1);
}

/// Tests anonymizing custom entity types end-to-end, alongside the
/// standard set, with a full round trip.
#[test]
fn test_custom_types_anonymize_and_restore() {
    let (built, _) = build_recognizers(&definitions());

    let mut detector = PatternDetector::new();
    let mut entity_types = EntityType::standard_set();
    for recognizer in built {
        entity_types.push(recognizer.entity_type().clone());
        detector.register(recognizer);
    }

    let config = AnonymizerConfig {
        entity_types,
        ..Default::default()
    };
    let anonymizer = Anonymizer::new(config, Box::new(detector));

    let text = "Customer reported issue with account ACC123456. \
                Their employee ID is EMP-2024-789, email sam@corp.example.";
    let mut store = EntityMappingStore::new();
    let document = anonymizer.anonymize(text, &mut store).unwrap();

    assert!(document.text.contains("<ACCOUNT_NUMBER_0>"));
    assert!(document.text.contains("<EMPLOYEE_ID_0>"));
    assert!(document.text.contains("<EMAIL_ADDRESS_0>"));
    assert!(!document.text.contains("ACC123456"));
    assert!(!document.text.contains("EMP-2024-789"));

    let restored = Deanonymizer::new().deanonymize(&document.text, &store).unwrap();
    assert_eq!(restored, text);
}

/// Tests that context words raise a custom recognizer's confidence.
#[test]
fn test_custom_context_boosts_score() {
    use shield_anonymize::SpanDetector;
    use std::collections::HashSet;

    let (built, _) = build_recognizers(&definitions());
    let mut detector = PatternDetector::new();
    let account = EntityType::new("ACCOUNT_NUMBER").unwrap();
    for recognizer in built {
        detector.register(recognizer);
    }
    let requested: HashSet<EntityType> = [account.clone()].into_iter().collect();

    let bare = detector.analyze("ref ACC123456", &requested, "en").unwrap();
    let boosted = detector
        .analyze("account ACC123456", &requested, "en")
        .unwrap();

    assert_eq!(bare.len(), 1);
    assert_eq!(boosted.len(), 1);
    assert!(boosted[0].score > bare[0].score);
}

/// Tests that requesting only custom types leaves standard PII alone.
#[test]
fn test_custom_only_request_scopes_detection() {
    let (built, _) = build_recognizers(&definitions());

    let mut detector = PatternDetector::new();
    let mut entity_types = Vec::new();
    for recognizer in built {
        entity_types.push(recognizer.entity_type().clone());
        detector.register(recognizer);
    }

    let config = AnonymizerConfig {
        entity_types,
        ..Default::default()
    };
    let anonymizer = Anonymizer::new(config, Box::new(detector));

    let text = "ACC123456 belongs to sam@corp.example";
    let mut store = EntityMappingStore::new();
    let document = anonymizer.anonymize(text, &mut store).unwrap();

    assert!(document.text.contains("<ACCOUNT_NUMBER_0>"));
    assert!(document.text.contains("sam@corp.example"));
}
