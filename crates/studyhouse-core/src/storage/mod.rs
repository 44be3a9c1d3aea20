mod config;
pub mod database;

pub use config::{Config, ExtractionConfig, SchedulingConfig, TimerConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/studyhouse[-dev]/` based on STUDYHOUSE_ENV.
///
/// Set STUDYHOUSE_ENV=dev to use a development data directory.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYHOUSE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyhouse-dev")
    } else {
        base_dir.join("studyhouse")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
