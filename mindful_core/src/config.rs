//! Configuration file support for Mindful.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/mindful/config.toml`.
//! Settings are read once when a timer starts and passed into the state
//! machines by value; nothing watches the file mid-run.

use crate::i18n::Language;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Duration choices offered by the settings surface
pub const MEDITATION_MINUTES_CHOICES: [u32; 5] = [2, 5, 7, 10, 15];
pub const JOURNALING_PAGE_SECONDS_CHOICES: [u32; 5] = [60, 120, 300, 420, 600];
pub const JOURNALING_BREAK_SECONDS_CHOICES: [u32; 3] = [5, 10, 15];

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Timer duration configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Meditation length in minutes
    #[serde(default = "default_meditation_minutes")]
    pub meditation_minutes: u32,

    /// Journaling per-page writing time in seconds
    #[serde(default = "default_journaling_page_seconds")]
    pub journaling_page_seconds: u32,

    /// Break between journaling pages in seconds
    #[serde(default = "default_journaling_break_seconds")]
    pub journaling_break_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            meditation_minutes: default_meditation_minutes(),
            journaling_page_seconds: default_journaling_page_seconds(),
            journaling_break_seconds: default_journaling_break_seconds(),
        }
    }
}

/// UI configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub language: Language,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("mindful")
}

fn default_meditation_minutes() -> u32 {
    5
}

fn default_journaling_page_seconds() -> u32 {
    60
}

fn default_journaling_break_seconds() -> u32 {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("mindful").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check every duration against its allowed set
    pub fn validate(&self) -> Result<()> {
        if !MEDITATION_MINUTES_CHOICES.contains(&self.timer.meditation_minutes) {
            return Err(Error::Config(format!(
                "meditation_minutes must be one of {:?}, got {}",
                MEDITATION_MINUTES_CHOICES, self.timer.meditation_minutes
            )));
        }
        if !JOURNALING_PAGE_SECONDS_CHOICES.contains(&self.timer.journaling_page_seconds) {
            return Err(Error::Config(format!(
                "journaling_page_seconds must be one of {:?}, got {}",
                JOURNALING_PAGE_SECONDS_CHOICES, self.timer.journaling_page_seconds
            )));
        }
        if !JOURNALING_BREAK_SECONDS_CHOICES.contains(&self.timer.journaling_break_seconds) {
            return Err(Error::Config(format!(
                "journaling_break_seconds must be one of {:?}, got {}",
                JOURNALING_BREAK_SECONDS_CHOICES, self.timer.journaling_break_seconds
            )));
        }
        Ok(())
    }
}
