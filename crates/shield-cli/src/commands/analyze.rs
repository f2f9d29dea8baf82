//! Analyze command.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use shield_anonymize::SpanDetector;

use crate::commands::{detector_with_recognizers, parse_entity_types, read_input};
use crate::output::{info, success, CliError};

/// Detect PII spans and report detection statistics.
#[derive(Args)]
pub struct AnalyzeCommand {
    /// Text to analyze
    #[arg(long, short, conflicts_with = "file")]
    text: Option<String>,

    /// Read from file
    #[arg(long, short, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Read from stdin
    #[arg(long, conflicts_with_all = ["text", "file"])]
    stdin: bool,

    /// Only detect specific entity types (default: the standard set)
    #[arg(long = "entity", short = 'e')]
    entities: Vec<String>,

    /// Minimum confidence threshold (0.0-1.0)
    #[arg(long, default_value = "0.6")]
    min_score: f64,

    /// Custom recognizer definitions file (JSON)
    #[arg(long)]
    recognizers: Option<PathBuf>,

    /// Emit spans as JSON instead of a listing
    #[arg(long)]
    json: bool,
}

impl AnalyzeCommand {
    /// Runs the analyze command.
    pub fn run(self) -> Result<(), CliError> {
        let input = read_input(self.text, self.file, self.stdin)?;
        let mut entity_types = parse_entity_types(&self.entities)?;
        let detector = detector_with_recognizers(self.recognizers.as_deref(), &mut entity_types)?;

        let requested = entity_types.into_iter().collect();
        let spans = detector
            .analyze(&input, &requested, "en")
            .map_err(shield_core::ShieldError::from)?;

        if self.json {
            let json = serde_json::to_string_pretty(&spans)
                .map_err(|e| CliError::output(format!("Failed to serialize spans: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        if spans.is_empty() {
            success("No PII detected");
            return Ok(());
        }

        let above = spans
            .iter()
            .filter(|s| s.score >= self.min_score)
            .count();

        for span in &spans {
            let value = span.slice(&input).unwrap_or("<invalid span>");
            let marker = if span.score >= self.min_score {
                "●".green()
            } else {
                "○".yellow()
            };
            println!(
                "  {} {}: {} at {}-{} (score: {:.2})",
                marker,
                span.entity_type.to_string().cyan(),
                value.red().bold(),
                span.start,
                span.end,
                span.score,
            );
        }

        println!();
        info(&format!(
            "{} detected, {} at or above threshold {:.2}",
            spans.len(),
            above,
            self.min_score
        ));

        Ok(())
    }
}
