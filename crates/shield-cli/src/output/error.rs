//! CLI error types and handling.

use std::process::ExitCode;

use colored::Colorize;

/// CLI error type.
#[derive(Debug)]
pub struct CliError {
    /// Error kind.
    pub kind: ErrorKind,
    /// Error message.
    pub message: String,
    /// Underlying cause.
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Validation error.
    Validation,
    /// Detection engine error.
    Detection,
    /// Mapping lookup error.
    Mapping,
    /// Mapping file persistence error.
    Persistence,
    /// IO error.
    Io,
    /// Output/formatting error.
    Output,
    /// Internal error.
    Internal,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a new CLI error with a cause.
    pub fn with_cause<E>(kind: ErrorKind, message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    /// Creates an output error.
    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Output, message)
    }

    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self.kind {
            ErrorKind::Validation => ExitCode::from(2),
            ErrorKind::Detection => ExitCode::from(3),
            ErrorKind::Mapping => ExitCode::from(4),
            ErrorKind::Persistence => ExitCode::from(5),
            ErrorKind::Io => ExitCode::from(6),
            ErrorKind::Output => ExitCode::from(7),
            ErrorKind::Internal => ExitCode::from(255),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref cause) = self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|e| e.as_ref() as _)
    }
}

impl From<shield_core::ShieldError> for CliError {
    fn from(error: shield_core::ShieldError) -> Self {
        use shield_core::ShieldError;

        let kind = match &error {
            ShieldError::Validation(_) => ErrorKind::Validation,
            ShieldError::Detection(_) => ErrorKind::Detection,
            ShieldError::Mapping(_) => ErrorKind::Mapping,
            ShieldError::Persistence(_) => ErrorKind::Persistence,
            ShieldError::Recognizer(_) => ErrorKind::Validation,
        };

        Self::with_cause(kind, error.to_string(), error)
    }
}

impl From<shield_core::PersistenceError> for CliError {
    fn from(error: shield_core::PersistenceError) -> Self {
        Self::with_cause(ErrorKind::Persistence, error.to_string(), error)
    }
}

impl From<shield_core::ValidationError> for CliError {
    fn from(error: shield_core::ValidationError) -> Self {
        Self::with_cause(ErrorKind::Validation, error.to_string(), error)
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::with_cause(ErrorKind::Io, "IO error", error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::with_cause(ErrorKind::Output, "JSON error", error)
    }
}

/// Prints an error to stderr.
pub fn print_error(error: &CliError) {
    let prefix = match error.kind {
        ErrorKind::Validation => "Validation error",
        ErrorKind::Detection => "Detection error",
        ErrorKind::Mapping => "Mapping error",
        ErrorKind::Persistence => "Persistence error",
        ErrorKind::Io => "IO error",
        ErrorKind::Output => "Output error",
        ErrorKind::Internal => "Internal error",
    };

    eprintln!("{} {}", format!("{}:", prefix).red().bold(), error.message);

    if let Some(ref cause) = error.cause {
        eprintln!("  {}", format!("Caused by: {cause}").dimmed());
    }

    // Print helpful hints based on error kind
    match error.kind {
        ErrorKind::Mapping => {
            eprintln!();
            eprintln!(
                "{}",
                "Hint: The mapping file may not belong to this document. Pass the".dimmed()
            );
            eprintln!(
                "{}",
                "  snapshot written by the anonymize run, or use --lenient.".dimmed()
            );
        }
        ErrorKind::Persistence => {
            eprintln!();
            eprintln!(
                "{}",
                "Hint: Check the mapping file path and that it contains snapshot JSON.".dimmed()
            );
        }
        _ => {}
    }
}
