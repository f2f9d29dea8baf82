//! Entities command.

use clap::Args;
use colored::Colorize;

use crate::output::CliError;

/// List the standard entity types.
#[derive(Args)]
pub struct EntitiesCommand {}

impl EntitiesCommand {
    /// Runs the entities command.
    pub fn run(self) -> Result<(), CliError> {
        println!("{}", "Standard entity types:".bold().underline());
        println!();

        for (name, description) in [
            ("PERSON", "Personal names"),
            ("PHONE_NUMBER", "US and international phone numbers"),
            ("EMAIL_ADDRESS", "Email addresses"),
            ("URL", "HTTP and HTTPS links"),
            ("IP_ADDRESS", "IPv4 and IPv6 addresses"),
        ] {
            println!("{}", name.green().bold());
            println!("  {description}");
            println!();
        }

        println!("Custom types can be added with --recognizers <FILE>.");

        Ok(())
    }
}
