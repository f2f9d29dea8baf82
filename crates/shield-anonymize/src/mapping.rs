//! Bidirectional entity mapping store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shield_core::{EntityType, MappingError};

use crate::token::{format_token, token_index};

/// Per-document bidirectional table between original values and placeholder
/// tokens, keyed by entity type.
///
/// A store is owned by a single anonymization pass: created empty (or
/// rebuilt from a [`crate::MappingSnapshot`]), mutated only through
/// [`assign`](Self::assign), and read-only during deanonymization. Sharing
/// one store across concurrent passes is not supported; batch callers give
/// each document its own instance.
///
/// Within one entity type the mapping is a bijection: an original value has
/// exactly one token and every token resolves to exactly one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityMappingStore {
    mappings: HashMap<EntityType, HashMap<String, String>>,
}

impl EntityMappingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the placeholder token for `original`, assigning a new one on
    /// first sight.
    ///
    /// Assignment is idempotent: the same `(entity_type, original)` pair
    /// always yields the same token, so repeated occurrences of one literal
    /// value share a single placeholder. A new token takes the next free
    /// index for the type, recovered from the numeric suffix of every token
    /// already stored — a store loaded from a hand-edited or partially
    /// written file may skip indices, and the counter must not collide with
    /// what is there.
    pub fn assign(&mut self, entity_type: &EntityType, original: &str) -> String {
        let by_value = self.mappings.entry(entity_type.clone()).or_default();
        if let Some(token) = by_value.get(original) {
            return token.clone();
        }

        let next = by_value
            .values()
            .filter_map(|token| token_index(token))
            .map(|index| index + 1)
            .max()
            .unwrap_or(0);
        let token = format_token(entity_type, next);
        by_value.insert(original.to_string(), token.clone());
        token
    }

    /// Looks up the original value behind `token` under `entity_type`.
    ///
    /// # Errors
    /// [`MappingError::UnknownEntityType`] if the type has no entries,
    /// [`MappingError::UnknownToken`] if no value maps to the token.
    pub fn reverse_lookup(
        &self,
        entity_type: &EntityType,
        token: &str,
    ) -> Result<&str, MappingError> {
        let by_value =
            self.mappings
                .get(entity_type)
                .ok_or_else(|| MappingError::UnknownEntityType {
                    entity_type: entity_type.as_str().to_string(),
                })?;
        by_value
            .iter()
            .find(|(_, stored)| stored.as_str() == token)
            .map(|(original, _)| original.as_str())
            .ok_or_else(|| MappingError::UnknownToken {
                token: token.to_string(),
                entity_type: entity_type.as_str().to_string(),
            })
    }

    /// True when no value has been mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.values().all(HashMap::is_empty)
    }

    /// Total number of mapped values across all entity types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.values().map(HashMap::len).sum()
    }

    /// Entity types present in the store.
    pub fn entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.mappings.keys()
    }

    /// The value-to-token table for one entity type, if present.
    #[must_use]
    pub fn mappings_for(&self, entity_type: &EntityType) -> Option<&HashMap<String, String>> {
        self.mappings.get(entity_type)
    }

    /// Iterates every `(entity_type, original, token)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityType, &str, &str)> {
        self.mappings.iter().flat_map(|(entity_type, by_value)| {
            by_value
                .iter()
                .map(move |(original, token)| (entity_type, original.as_str(), token.as_str()))
        })
    }
}
