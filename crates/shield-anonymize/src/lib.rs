//! PII span detection and reversible anonymization.
//!
//! This crate implements the reversible anonymization pipeline for
//! support-ticket text: a detector finds PII spans, the anonymization engine
//! replaces each surviving span with a deterministic placeholder token
//! (`<ENTITY_TYPE_N>`), and the deanonymization engine restores the original
//! values from the mapping, byte-for-byte.
//!
//! The [`EntityMappingStore`] is the pivot: a per-document bidirectional
//! table between original values and tokens, owned by the caller, mutated
//! only during a single anonymization pass, and persistable as a
//! [`MappingSnapshot`] for restoration across process boundaries.

pub mod anonymizer;
pub mod deanonymizer;
pub mod detector;
pub mod mapping;
pub mod recognizer;
pub mod snapshot;
pub mod token;

pub use anonymizer::{AnonymizedDocument, Anonymizer, AnonymizerConfig, AppliedSubstitution};
pub use deanonymizer::Deanonymizer;
pub use detector::{DetectorConfig, PatternDetector, SpanDetector};
pub use mapping::EntityMappingStore;
pub use recognizer::{build_recognizers, CustomRecognizer, RecognizerDefinition};
pub use snapshot::{MappingSnapshot, SnapshotMetadata};
pub use token::{format_token, parse_token};
