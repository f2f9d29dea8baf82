//! Deanonymize command.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use shield_anonymize::{Deanonymizer, MappingSnapshot};

use crate::commands::read_input;
use crate::output::{success, warn, CliError};

/// Sentinel substituted for unknown tokens in lenient mode.
const NOT_FOUND_SENTINEL: &str = "[NOT_FOUND]";

/// Restore anonymized text from a mapping snapshot.
#[derive(Args)]
pub struct DeanonymizeCommand {
    /// Text to restore
    #[arg(long, short, conflicts_with = "file")]
    text: Option<String>,

    /// Read from file
    #[arg(long, short, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Read from stdin
    #[arg(long, conflicts_with_all = ["text", "file"])]
    stdin: bool,

    /// Mapping snapshot written by the anonymize run
    #[arg(long, short)]
    mapping: PathBuf,

    /// Substitute [NOT_FOUND] for unknown tokens instead of failing
    #[arg(long)]
    lenient: bool,

    /// Where to write the restored text (default: stdout)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output only the restored text (no counts)
    #[arg(long, short)]
    quiet: bool,
}

impl DeanonymizeCommand {
    /// Runs the deanonymize command.
    pub fn run(self) -> Result<(), CliError> {
        let input = read_input(self.text, self.file, self.stdin)?;

        // A missing or corrupt mapping file degrades to an empty store: the
        // run continues (and leaves tokens in place) rather than crashing.
        let store = MappingSnapshot::load_or_default(&self.mapping).into_store();
        if store.is_empty() {
            warn(&format!(
                "no mappings loaded from {}; text will pass through unchanged",
                self.mapping.display()
            ));
        }

        let deanonymizer = Deanonymizer::new();
        let (restored, failures) = if self.lenient {
            deanonymizer.deanonymize_lossy(&input, &store, NOT_FOUND_SENTINEL)
        } else {
            (deanonymizer.deanonymize(&input, &store)?, Vec::new())
        };

        for failure in &failures {
            warn(&format!("{failure}; substituted {NOT_FOUND_SENTINEL}"));
        }

        match &self.output {
            Some(path) => fs::write(path, &restored)
                .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?,
            None => print!("{restored}"),
        }

        if !self.quiet {
            if failures.is_empty() {
                success("document restored");
            } else {
                success(&format!(
                    "document restored with {} unresolved token(s)",
                    failures.len()
                ));
            }
        }

        Ok(())
    }
}
