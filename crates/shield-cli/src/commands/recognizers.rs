//! Recognizers command.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use shield_anonymize::build_recognizers;

use crate::commands::load_definitions;
use crate::output::{success, warn, CliError};

/// Validate a custom recognizer definitions file.
#[derive(Args)]
pub struct RecognizersCommand {
    /// Definitions file (JSON array of {entity_name, patterns, context, score})
    #[arg(long, short)]
    file: PathBuf,
}

impl RecognizersCommand {
    /// Runs the recognizers command.
    pub fn run(self) -> Result<(), CliError> {
        let definitions = load_definitions(&self.file)?;
        let total = definitions.len();
        let (built, failures) = build_recognizers(&definitions);

        for recognizer in &built {
            println!(
                "{} ({} pattern(s), base score {:.2})",
                recognizer.entity_type().to_string().green().bold(),
                recognizer.pattern_count(),
                recognizer.score(),
            );
        }

        for failure in &failures {
            warn(&format!("{failure}"));
        }

        println!();
        success(&format!("{} of {total} definitions usable", built.len()));

        Ok(())
    }
}
