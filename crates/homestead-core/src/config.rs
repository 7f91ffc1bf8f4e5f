//! Runtime configuration from an optional `key value` text file.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recognized settings. Anything else in the file is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Stored and displayed; does not alter the mechanics.
    pub difficulty: String,
    /// When true the client saves after every management phase.
    pub auto_save: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: "normal".to_string(),
            auto_save: true,
        }
    }
}

impl GameConfig {
    /// Read a config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(_) => {
                log::info!("no config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse `key value` lines over the defaults.
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        for line in text.lines() {
            let mut parts = line.split_whitespace();
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            match key {
                "difficulty" => config.difficulty = value.to_string(),
                "auto_save" => config.auto_save = value == "true" || value == "1",
                other => log::debug!("ignoring unknown config key: {}", other),
            }
        }
        config
    }
}
