use crate::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_UPCOMING_DAYS: u32 = 7;
const DEFAULT_LOG_LEVEL: &str = "warn";
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Keys accepted by `config <key> [value]`.
pub const CONFIG_KEYS: &[&str] = &["upcoming-days", "log-level"];

/// User settings, stored in `<data-dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotConfig {
    /// Window used by `birthdays` when `--days` is not given.
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: u32,

    /// Log level when `--verbose` is not given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_upcoming_days() -> u32 {
    DEFAULT_UPCOMING_DAYS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            log_level: default_log_level(),
        }
    }
}

impl BotConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(&config_path).map_err(|e| BotError::persistence(&config_path, e))?;
        serde_json::from_str(&content).map_err(|e| BotError::persistence(&config_path, e))
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|e| BotError::persistence(config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content).map_err(|e| BotError::persistence(&config_path, e))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "upcoming-days" => Some(self.upcoming_days.to_string()),
            "log-level" => Some(self.log_level.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match normalize_key(key).as_str() {
            "upcoming-days" => {
                self.upcoming_days = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("upcoming-days must be a whole number, got '{}'", value))?;
            }
            "log-level" => {
                let level = value.trim().to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(format!(
                        "log-level must be one of {}, got '{}'",
                        LOG_LEVELS.join("|"),
                        value
                    ));
                }
                self.log_level = level;
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('_', "-")
}
