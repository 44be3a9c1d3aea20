//! Configuration management commands.

use clap::Subcommand;
use studyhouse_core::{Config, GeminiExtractor, Philosophy};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,
    /// Choose the scheduling philosophy
    SetPhilosophy {
        /// "review" (spaced repetition) or "plan" (date-range distribution)
        philosophy: String,
    },
    /// Store the extraction API key in the OS keyring
    SetApiKey {
        /// API key for the document-extraction service
        key: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetPhilosophy { philosophy } => {
            let parsed = match philosophy.as_str() {
                "review" => Philosophy::Review,
                "plan" => Philosophy::Plan,
                other => return Err(format!("unknown philosophy: {other}").into()),
            };
            let mut config = Config::load_or_default();
            config.scheduling.philosophy = parsed;
            config.save()?;
            println!("Scheduling philosophy set to {philosophy}.");
        }
        ConfigAction::SetApiKey { key } => {
            GeminiExtractor::set_api_key(&key)?;
            println!("API key stored.");
        }
    }
    Ok(())
}
