//! CLI command definitions and implementations.

mod analyze;
mod anonymize;
mod deanonymize;
mod entities;
mod recognizers;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use shield_anonymize::{build_recognizers, PatternDetector, RecognizerDefinition};
use shield_core::EntityType;

use crate::output::{warn, CliError};

pub use analyze::AnalyzeCommand;
pub use anonymize::AnonymizeCommand;
pub use deanonymize::DeanonymizeCommand;
pub use entities::EntitiesCommand;
pub use recognizers::RecognizersCommand;

/// ticket-shield CLI
///
/// Reversible anonymization for support-ticket text: detected PII is
/// replaced with stable placeholder tokens and later restored from a saved
/// mapping file.
#[derive(Parser)]
#[command(name = "shield")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Detect PII spans and report detection statistics
    Analyze(AnalyzeCommand),

    /// Anonymize ticket text, writing the mapping snapshot for later restore
    Anonymize(AnonymizeCommand),

    /// Restore anonymized text from a mapping snapshot
    Deanonymize(DeanonymizeCommand),

    /// List the standard entity types
    Entities(EntitiesCommand),

    /// Validate a custom recognizer definitions file
    Recognizers(RecognizersCommand),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<(), CliError> {
        // Apply color settings
        if self.no_color {
            colored::control::set_override(false);
        }

        match self.command {
            Commands::Analyze(cmd) => cmd.run(),
            Commands::Anonymize(cmd) => cmd.run(),
            Commands::Deanonymize(cmd) => cmd.run(),
            Commands::Entities(cmd) => cmd.run(),
            Commands::Recognizers(cmd) => cmd.run(),
        }
    }
}

/// Resolves the input text from --text, --file, or --stdin.
pub(crate) fn read_input(
    text: Option<String>,
    file: Option<PathBuf>,
    stdin: bool,
) -> Result<String, CliError> {
    if let Some(t) = text {
        Ok(t)
    } else if let Some(path) = file {
        std::fs::read_to_string(&path)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))
    } else if stdin {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| CliError::io(format!("Failed to read stdin: {e}")))?;
        Ok(buffer)
    } else {
        Err(CliError::validation(
            "Provide input with --text, --file, or --stdin",
        ))
    }
}

/// Parses entity type names, defaulting to the standard set when none are
/// given. Names are accepted case-insensitively.
pub(crate) fn parse_entity_types(types: &[String]) -> Result<Vec<EntityType>, CliError> {
    if types.is_empty() {
        return Ok(EntityType::standard_set());
    }
    types
        .iter()
        .map(|name| {
            EntityType::new(name.to_ascii_uppercase())
                .map_err(|e| CliError::validation(e.to_string()))
        })
        .collect()
}

/// Loads a recognizer definitions file.
pub(crate) fn load_definitions(path: &Path) -> Result<Vec<RecognizerDefinition>, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content).map_err(|e| {
        CliError::validation(format!(
            "{} is not a recognizer definitions file: {e}",
            path.display()
        ))
    })
}

/// Builds a detector with custom recognizers registered, extending
/// `entity_types` with each recognizer's type. Malformed definitions are
/// reported and skipped; the batch continues.
pub(crate) fn detector_with_recognizers(
    definitions_path: Option<&Path>,
    entity_types: &mut Vec<EntityType>,
) -> Result<PatternDetector, CliError> {
    let mut detector = PatternDetector::new();

    if let Some(path) = definitions_path {
        let definitions = load_definitions(path)?;
        let (built, failures) = build_recognizers(&definitions);

        for failure in &failures {
            warn(&format!("skipped custom recognizer: {failure}"));
        }

        for recognizer in built {
            if !entity_types.contains(recognizer.entity_type()) {
                entity_types.push(recognizer.entity_type().clone());
            }
            detector.register(recognizer);
        }
    }

    Ok(detector)
}
