//! Error types for ticket-shield.

use std::fmt;
use thiserror::Error;

/// Result type alias using [`ShieldError`].
pub type ShieldResult<T> = Result<T, ShieldError>;

/// Main error type for ticket-shield.
#[derive(Debug, Error)]
pub enum ShieldError {
    /// Detection errors (1000-1999).
    #[error("detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Validation errors (2000-2999).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Mapping errors (3000-3999).
    #[error("mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Persistence errors (4000-4999).
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Custom recognizer errors (5000-5999).
    #[error("recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),
}

impl ShieldError {
    /// Returns the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Detection(e) => e.code(),
            Self::Validation(e) => e.code(),
            Self::Mapping(e) => e.code(),
            Self::Persistence(e) => e.code(),
            Self::Recognizer(e) => e.code(),
        }
    }

    /// Returns true if the caller can recover and continue processing.
    ///
    /// Mapping lookups may be retried against a different store or replaced
    /// with a sentinel; a malformed recognizer is skipped while the rest of
    /// the batch loads. Detection and validation failures abort the call.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Mapping(_) | Self::Recognizer(_) | Self::Persistence(_))
    }
}

/// Detection errors.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The detector backend failed.
    #[error("span detection failed: {0}")]
    Backend(String),

    /// A detector produced offsets outside the document or off a UTF-8
    /// boundary.
    #[error("detector produced invalid span {start}..{end} for {entity_type}")]
    InvalidSpan {
        /// The entity type of the offending span.
        entity_type: String,
        /// Start byte offset.
        start: usize,
        /// End byte offset.
        end: usize,
    },
}

impl DetectionError {
    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Backend(_) => ErrorCode::new(1001),
            Self::InvalidSpan { .. } => ErrorCode::new(1002),
        }
    }
}

/// Validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field was missing or empty.
    #[error("required field missing: {0}")]
    RequiredField(String),

    /// An entity type name was not uppercase `[A-Z_]`.
    #[error("invalid entity type name: {0:?}")]
    InvalidEntityType(String),

    /// A numeric value fell outside its allowed range.
    #[error("value out of range for {field}: {message}")]
    OutOfRange {
        /// The field name.
        field: String,
        /// The error message.
        message: String,
    },
}

impl ValidationError {
    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::RequiredField(_) => ErrorCode::new(2001),
            Self::InvalidEntityType(_) => ErrorCode::new(2002),
            Self::OutOfRange { .. } => ErrorCode::new(2003),
        }
    }
}

/// Mapping store lookup errors, surfaced during deanonymization.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The entity type has no entries in the store.
    #[error("unknown entity type: {entity_type}")]
    UnknownEntityType {
        /// The entity type parsed out of the token.
        entity_type: String,
    },

    /// No value maps to the token under its entity type.
    #[error("unknown token {token} for entity type {entity_type}")]
    UnknownToken {
        /// The literal token text.
        token: String,
        /// The entity type parsed out of the token.
        entity_type: String,
    },
}

impl MappingError {
    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownEntityType { .. } => ErrorCode::new(3001),
            Self::UnknownToken { .. } => ErrorCode::new(3002),
        }
    }
}

/// Mapping snapshot persistence errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading the mapping file failed.
    #[error("failed to read mapping file {path}: {source}")]
    Read {
        /// The file path.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the mapping file failed.
    #[error("failed to write mapping file {path}: {source}")]
    Write {
        /// The file path.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The mapping file was not valid JSON for the snapshot schema.
    #[error("malformed mapping file {path}: {source}")]
    Malformed {
        /// The file path.
        path: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a snapshot failed.
    #[error("failed to encode mapping snapshot: {source}")]
    Encode {
        /// The underlying encode error.
        #[source]
        source: serde_json::Error,
    },

    /// The mapping file decoded but violated a snapshot invariant.
    #[error("inconsistent mapping file {path}: {reason}")]
    Inconsistent {
        /// The file path.
        path: String,
        /// What was violated.
        reason: String,
    },
}

impl PersistenceError {
    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::new(4001),
            Self::Write { .. } => ErrorCode::new(4002),
            Self::Malformed { .. } => ErrorCode::new(4003),
            Self::Encode { .. } => ErrorCode::new(4004),
            Self::Inconsistent { .. } => ErrorCode::new(4005),
        }
    }
}

/// Custom recognizer definition errors.
///
/// Each error names the offending definition; batch loading skips it and
/// continues with the rest.
#[derive(Debug, Error)]
pub enum RecognizerError {
    /// The entity name was not uppercase `[A-Z_]`.
    #[error("recognizer {entity_name:?}: entity name must be uppercase")]
    InvalidName {
        /// The rejected name.
        entity_name: String,
    },

    /// The score fell outside `[0, 1]`.
    #[error("recognizer {entity_name}: score {score} outside [0, 1]")]
    ScoreOutOfRange {
        /// The definition's entity name.
        entity_name: String,
        /// The rejected score.
        score: f64,
    },

    /// The definition carried no patterns.
    #[error("recognizer {entity_name}: no patterns given")]
    EmptyPatterns {
        /// The definition's entity name.
        entity_name: String,
    },

    /// A pattern failed to compile.
    #[error("recognizer {entity_name}: pattern {pattern:?} failed to compile: {reason}")]
    BadPattern {
        /// The definition's entity name.
        entity_name: String,
        /// The rejected pattern.
        pattern: String,
        /// The compile error.
        reason: String,
    },
}

impl RecognizerError {
    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidName { .. } => ErrorCode::new(5001),
            Self::ScoreOutOfRange { .. } => ErrorCode::new(5002),
            Self::EmptyPatterns { .. } => ErrorCode::new(5003),
            Self::BadPattern { .. } => ErrorCode::new(5004),
        }
    }
}

/// Error code with numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Creates a new error code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHIELD_{:04}", self.0)
    }
}
