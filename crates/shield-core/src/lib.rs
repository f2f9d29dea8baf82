//! # Shield Core
//!
//! Core domain types and error hierarchy for ticket-shield:
//! - Entity types and detected spans
//! - The analyzed-entity record persisted in mapping snapshots
//! - Error types

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod error;

pub use entity::{AnalyzedEntity, EntityType, Span, STANDARD_ENTITY_TYPES};
pub use error::{
    DetectionError, ErrorCode, MappingError, PersistenceError, RecognizerError, ShieldError,
    ShieldResult, ValidationError,
};
