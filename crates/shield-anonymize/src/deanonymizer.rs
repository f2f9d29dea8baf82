//! Deanonymization engine.
//!
//! Scans a document for placeholder tokens and restores the original values
//! from a mapping store. Only substrings matching the strict token grammar
//! are touched; bracketed text that merely resembles a token passes through.

use shield_core::{MappingError, ShieldResult};

use crate::mapping::EntityMappingStore;
use crate::token::{parse_token, TOKEN_PATTERN};

/// Deanonymization engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deanonymizer;

impl Deanonymizer {
    /// Creates a deanonymizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Restores every placeholder token in `text` from `store`.
    ///
    /// An empty store is a no-op: the input comes back unchanged. Every
    /// occurrence of a given token is replaced with the same original value,
    /// so a document whose spans were all anonymized from this store is
    /// restored byte-for-byte. Spans that were filtered out at anonymization
    /// time were never tokenized and are never touched here.
    ///
    /// # Errors
    /// [`MappingError::UnknownEntityType`] when a token's type has no
    /// entries in the store; [`MappingError::UnknownToken`] when the token
    /// itself has no mapping under a known type.
    pub fn deanonymize(&self, text: &str, store: &EntityMappingStore) -> ShieldResult<String> {
        if store.is_empty() {
            return Ok(text.to_string());
        }

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for found in TOKEN_PATTERN.find_iter(text) {
            out.push_str(&text[cursor..found.start()]);
            cursor = found.end();

            let token = found.as_str();
            match parse_token(token) {
                Some((entity_type, _)) => {
                    let original = store.reverse_lookup(&entity_type, token)?;
                    out.push_str(original);
                }
                // The scan regex and the grammar agree; anything the scan
                // found parses. Kept as a pass-through rather than a panic.
                None => out.push_str(token),
            }
        }
        out.push_str(&text[cursor..]);
        Ok(out)
    }

    /// Like [`deanonymize`](Self::deanonymize), but substitutes `sentinel`
    /// for failed lookups instead of failing, reporting every failure.
    ///
    /// The strict/lossy split keeps "lookup failed" distinguishable from
    /// "restored": the engine never silently bakes a sentinel into its
    /// output — callers opt in and receive the failures alongside it.
    pub fn deanonymize_lossy(
        &self,
        text: &str,
        store: &EntityMappingStore,
        sentinel: &str,
    ) -> (String, Vec<MappingError>) {
        if store.is_empty() {
            return (text.to_string(), Vec::new());
        }

        let mut out = String::with_capacity(text.len());
        let mut failures = Vec::new();
        let mut cursor = 0;
        for found in TOKEN_PATTERN.find_iter(text) {
            out.push_str(&text[cursor..found.start()]);
            cursor = found.end();

            let token = found.as_str();
            match parse_token(token) {
                Some((entity_type, _)) => match store.reverse_lookup(&entity_type, token) {
                    Ok(original) => out.push_str(original),
                    Err(e) => {
                        failures.push(e);
                        out.push_str(sentinel);
                    }
                },
                None => out.push_str(token),
            }
        }
        out.push_str(&text[cursor..]);
        (out, failures)
    }
}
