//! Anonymization integration tests.

use crate::common;
use shield_anonymize::EntityMappingStore;

/// Tests the full sample ticket: every standard entity type is replaced.
#[test]
fn test_anonymize_sample_ticket() {
    let anonymizer = common::default_anonymizer();
    let mut store = EntityMappingStore::new();

    let document = anonymizer
        .anonymize(common::SAMPLE_TICKET, &mut store)
        .unwrap();

    assert!(!document.text.contains("John Doe"));
    assert!(!document.text.contains("555-123-4567"));
    assert!(!document.text.contains("john.doe@example.com"));
    assert!(!document.text.contains("https://example.com"));
    assert!(!document.text.contains("192.168.1.1"));

    assert!(document.text.contains("<PERSON_0>"));
    assert!(document.text.contains("<PHONE_NUMBER_0>"));
    assert!(document.text.contains("<EMAIL_ADDRESS_0>"));
    assert!(document.text.contains("<URL_0>"));
    assert!(document.text.contains("<IP_ADDRESS_0>"));

    // Non-PII structure survives.
    assert!(document.text.contains("Issue: Unable to login"));
}

/// Tests the worked example: repeated values share one token, the mapping
/// holds exactly one entry per distinct value.
#[test]
fn test_worked_example() {
    let anonymizer = common::default_anonymizer();
    let mut store = EntityMappingStore::new();
    let text = "Email john@x.com, call 555-1234, email john@x.com again";

    let document = anonymizer.anonymize(text, &mut store).unwrap();

    assert_eq!(document.text.matches("<EMAIL_ADDRESS_0>").count(), 2);
    assert_eq!(document.text.matches("<PHONE_NUMBER_0>").count(), 1);
    assert!(!document.text.contains("john@x.com"));
    assert!(!document.text.contains("555-1234"));
    assert_eq!(store.len(), 2);
}

/// Tests that three occurrences of one email collapse to a single mapping
/// entry and a single token.
#[test]
fn test_repeated_value_single_token() {
    let anonymizer = common::default_anonymizer();
    let mut store = EntityMappingStore::new();

    let document = anonymizer
        .anonymize(common::REPEATED_PII_TICKET, &mut store)
        .unwrap();

    assert_eq!(document.text.matches("<EMAIL_ADDRESS_0>").count(), 3);
    assert!(!document.text.contains("<EMAIL_ADDRESS_1>"));
    assert_eq!(store.len(), 1);
}

/// Tests threshold filtering: above-threshold count never exceeds total,
/// and every analyzed entity met the threshold.
#[test]
fn test_threshold_filtering() {
    let threshold = 0.9;
    let anonymizer = common::anonymizer_with_threshold(threshold);
    let mut store = EntityMappingStore::new();

    let document = anonymizer
        .anonymize(common::SAMPLE_TICKET, &mut store)
        .unwrap();

    assert!(document.above_threshold() <= document.total_detected());
    for analyzed in &document.analyzed_entities {
        assert!(
            analyzed.score >= threshold,
            "{analyzed:?} below threshold {threshold}"
        );
    }
}

/// Tests that a permissive threshold anonymizes strictly more than a
/// strict one on the same text.
#[test]
fn test_threshold_monotonicity() {
    let text = common::SAMPLE_TICKET;

    let mut permissive_store = EntityMappingStore::new();
    let permissive = common::anonymizer_with_threshold(0.5)
        .anonymize(text, &mut permissive_store)
        .unwrap();

    let mut strict_store = EntityMappingStore::new();
    let strict = common::anonymizer_with_threshold(0.99)
        .anonymize(text, &mut strict_store)
        .unwrap();

    assert_eq!(permissive.total_detected(), strict.total_detected());
    assert!(permissive.above_threshold() >= strict.above_threshold());
}

/// Tests that clean text passes through untouched with empty mappings.
#[test]
fn test_clean_text_untouched() {
    let anonymizer = common::default_anonymizer();

    for text in common::CLEAN_TEXTS {
        let mut store = EntityMappingStore::new();
        let document = anonymizer.anonymize(text, &mut store).unwrap();

        assert_eq!(document.text, *text, "clean text was modified");
        assert_eq!(document.total_detected(), 0);
        assert!(store.is_empty());
    }
}

/// Tests that substitutions are reported in document order.
#[test]
fn test_substitutions_in_document_order() {
    let anonymizer = common::default_anonymizer();
    let mut store = EntityMappingStore::new();

    let document = anonymizer
        .anonymize(common::SAMPLE_TICKET, &mut store)
        .unwrap();

    let starts: Vec<usize> = document.substitutions.iter().map(|s| s.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

/// Tests that one store accumulates mappings across two sequential passes
/// (two documents merged deliberately by the caller).
#[test]
fn test_sequential_passes_share_counters() {
    let anonymizer = common::default_anonymizer();
    let mut store = EntityMappingStore::new();

    let first = anonymizer
        .anonymize("Reach me at first@x.com", &mut store)
        .unwrap();
    let second = anonymizer
        .anonymize("Reach me at second@x.com", &mut store)
        .unwrap();

    assert!(first.text.contains("<EMAIL_ADDRESS_0>"));
    assert!(second.text.contains("<EMAIL_ADDRESS_1>"));
    assert_eq!(store.len(), 2);
}
