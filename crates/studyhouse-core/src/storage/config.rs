//! TOML-based application configuration.
//!
//! Stores the scheduling philosophy, timer durations, and the extraction
//! model name. Stored at `~/.config/studyhouse/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::scheduling::Philosophy;

/// Scheduling-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Which strategy the application composes at startup.
    #[serde(default)]
    pub philosophy: Philosophy,
}

/// Focus-timer durations in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u64,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u64,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u64,
}

/// Document-extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Model the extraction collaborator is asked to use.
    #[serde(default = "default_extraction_model")]
    pub model: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyhouse/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

// Default functions
fn default_focus_minutes() -> u64 {
    25
}
fn default_short_break_minutes() -> u64 {
    5
}
fn default_long_break_minutes() -> u64 {
    15
}
fn default_extraction_model() -> String {
    "gemini-3-flash-preview".into()
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            philosophy: Philosophy::default(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: default_extraction_model(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheduling: SchedulingConfig::default(),
            timer: TimerConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|err| ConfigError::Load {
            path: PathBuf::from("~/.config/studyhouse"),
            message: err.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, writing defaults on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|err| ConfigError::Save {
            path: path.clone(),
            message: err.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|err| ConfigError::Save {
            path,
            message: err.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let config = Config::default();
        let content = toml::to_string_pretty(&config).unwrap();
        let decoded: Config = toml::from_str(&content).unwrap();
        assert_eq!(decoded.scheduling.philosophy, Philosophy::Review);
        assert_eq!(decoded.timer.focus_minutes, 25);
        assert_eq!(decoded.extraction.model, "gemini-3-flash-preview");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let decoded: Config = toml::from_str("[scheduling]\nphilosophy = \"plan\"\n").unwrap();
        assert_eq!(decoded.scheduling.philosophy, Philosophy::Plan);
        assert_eq!(decoded.timer.short_break_minutes, 5);
    }
}
