//! Anonymize command.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use shield_anonymize::{Anonymizer, AnonymizerConfig, EntityMappingStore, MappingSnapshot};

use crate::commands::{detector_with_recognizers, parse_entity_types, read_input};
use crate::output::{success, CliError};

/// Anonymize ticket text.
#[derive(Args)]
pub struct AnonymizeCommand {
    /// Text to anonymize
    #[arg(long, short, conflicts_with = "file")]
    text: Option<String>,

    /// Read from file
    #[arg(long, short, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Read from stdin
    #[arg(long, conflicts_with_all = ["text", "file"])]
    stdin: bool,

    /// Only anonymize specific entity types (default: the standard set)
    #[arg(long = "entity", short = 'e')]
    entities: Vec<String>,

    /// Minimum confidence threshold (0.0-1.0)
    #[arg(long, default_value = "0.6")]
    min_score: f64,

    /// Custom recognizer definitions file (JSON)
    #[arg(long)]
    recognizers: Option<PathBuf>,

    /// Where to write the mapping snapshot
    #[arg(long, short)]
    mapping: Option<PathBuf>,

    /// Where to write the anonymized text (default: stdout)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output only the anonymized text (no counts)
    #[arg(long, short)]
    quiet: bool,
}

impl AnonymizeCommand {
    /// Runs the anonymize command.
    pub fn run(self) -> Result<(), CliError> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(CliError::validation(format!(
                "--min-score must be within [0, 1], got {}",
                self.min_score
            )));
        }

        let input = read_input(self.text, self.file, self.stdin)?;
        let mut entity_types = parse_entity_types(&self.entities)?;
        let detector = detector_with_recognizers(self.recognizers.as_deref(), &mut entity_types)?;

        let config = AnonymizerConfig {
            entity_types,
            min_score_threshold: self.min_score,
            ..Default::default()
        };
        let anonymizer = Anonymizer::new(config, Box::new(detector));

        let mut store = EntityMappingStore::new();
        let document = anonymizer.anonymize(&input, &mut store)?;

        if let Some(path) = &self.mapping {
            let snapshot = MappingSnapshot::capture(&store, &document, self.min_score);
            snapshot.save(path)?;
        }

        match &self.output {
            Some(path) => fs::write(path, &document.text)
                .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?,
            None => print!("{}", document.text),
        }

        if !self.quiet {
            success(&format!(
                "{} entities detected, {} at or above threshold, {} unique values mapped",
                document.total_detected(),
                document.above_threshold(),
                store.len(),
            ));
            if let Some(path) = &self.mapping {
                success(&format!("mapping snapshot written to {}", path.display()));
            }
        }

        Ok(())
    }
}
