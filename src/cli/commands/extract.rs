//! Offline city extraction command.

use console::style;

use crate::services::extract_city;

/// Print the city a command resolves to.
pub fn cmd_extract(command: &str) -> anyhow::Result<()> {
    match extract_city(command) {
        Some(city) => {
            println!("{} {}", style("✓").green(), city);
            Ok(())
        }
        None => {
            eprintln!(
                "{} Could not understand the city name in {:?}",
                style("✗").red(),
                command
            );
            anyhow::bail!("no city recognized")
        }
    }
}
