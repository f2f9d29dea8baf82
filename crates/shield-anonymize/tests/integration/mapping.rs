//! Mapping store integration tests.

use shield_anonymize::EntityMappingStore;
use shield_core::EntityType;

fn entity(name: &str) -> EntityType {
    EntityType::new(name).unwrap()
}

/// Tests that assignment is idempotent for every (type, value) pair.
#[test]
fn test_assign_idempotent() {
    let mut store = EntityMappingStore::new();
    let email = entity("EMAIL_ADDRESS");

    let values = ["a@x.com", "b@x.com", "a@x.com", "c@x.com", "b@x.com"];
    let tokens: Vec<String> = values.iter().map(|v| store.assign(&email, v)).collect();

    assert_eq!(tokens[0], tokens[2]);
    assert_eq!(tokens[1], tokens[4]);
    assert_eq!(store.len(), 3);
}

/// Tests that indices are exactly 0..k-1 per type regardless of how
/// assignments interleave across types.
#[test]
fn test_indices_dense_under_interleaving() {
    let mut store = EntityMappingStore::new();
    let person = entity("PERSON");
    let url = entity("URL");

    store.assign(&person, "John Doe");
    store.assign(&url, "https://a.example");
    store.assign(&person, "Jane Roe");
    store.assign(&url, "https://b.example");
    store.assign(&person, "Sam Poe");

    let mut person_indices: Vec<u32> = store
        .mappings_for(&person)
        .unwrap()
        .values()
        .map(|token| {
            shield_anonymize::parse_token(token)
                .map(|(_, index)| index)
                .unwrap()
        })
        .collect();
    person_indices.sort_unstable();
    assert_eq!(person_indices, vec![0, 1, 2]);

    let mut url_indices: Vec<u32> = store
        .mappings_for(&url)
        .unwrap()
        .values()
        .map(|token| {
            shield_anonymize::parse_token(token)
                .map(|(_, index)| index)
                .unwrap()
        })
        .collect();
    url_indices.sort_unstable();
    assert_eq!(url_indices, vec![0, 1]);
}

/// Tests that a store rebuilt from an edited snapshot continues counting
/// past the highest stored index instead of trusting a counter.
#[test]
fn test_index_recovery_from_edited_mapping() {
    let json = serde_json::json!({
        "PERSON": {
            "John Doe": "<PERSON_2>",
            "Jane Roe": "<PERSON_9>"
        },
        "URL": {}
    });
    let mut store: EntityMappingStore = serde_json::from_value(json).unwrap();

    assert_eq!(store.assign(&entity("PERSON"), "Sam Poe"), "<PERSON_10>");
    assert_eq!(store.assign(&entity("URL"), "https://x.example"), "<URL_0>");
}

/// Tests reverse lookup across everything assigned.
#[test]
fn test_reverse_lookup_every_assignment() {
    let mut store = EntityMappingStore::new();
    let pairs = [
        ("PERSON", "John Doe"),
        ("PERSON", "Jane Roe"),
        ("EMAIL_ADDRESS", "a@x.com"),
        ("IP_ADDRESS", "10.0.0.1"),
    ];

    let assigned: Vec<(EntityType, String, String)> = pairs
        .iter()
        .map(|(entity_type, value)| {
            let entity_type = entity(entity_type);
            let token = store.assign(&entity_type, value);
            (entity_type, (*value).to_string(), token)
        })
        .collect();

    for (entity_type, value, token) in &assigned {
        assert_eq!(store.reverse_lookup(entity_type, token).unwrap(), value);
    }
}
