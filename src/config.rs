//! User settings for splitbills
//!
//! Settings are read from a JSON file. Every field has a default, so a
//! partial file (or no file at all) is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::AppError;
use crate::domain::DEFAULT_FRIEND_IMAGE;
use crate::i18n::Language;

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "SPLITBILLS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Language used for labels at startup
    #[serde(default)]
    pub language: Language,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Image reference for friends added without one
    #[serde(default = "default_image")]
    pub default_image: String,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_image() -> String {
    DEFAULT_FRIEND_IMAGE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            currency_symbol: default_currency(),
            default_image: default_image(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or return defaults when no path is given.
    /// A path that cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            AppError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Write settings as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, contents).map_err(|e| {
            AppError::Config(format!(
                "Failed to write settings file {}: {}",
                path.display(),
                e
            ))
        })
    }
}
