use crate::api::BotApi;
use crate::config::BotConfig;
use crate::error::{BotError, Result};
use crate::logging::{effective_level, init_logging};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides the data directory when set.
pub const DATA_DIR_ENV: &str = "BOT_HELPER_DATA";

pub struct BotContext {
    pub api: BotApi<FileStore>,
    pub config: BotConfig,
    /// Why the logger could not start, if it could not.
    pub log_warning: Option<String>,
}

/// Where contacts, notes and config live: `$BOT_HELPER_DATA` if set and
/// non-empty, else the platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    resolve_data_dir(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
}

fn resolve_data_dir(env_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = env_override.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    ProjectDirs::from("com", "bot-helper", "bot-helper")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            BotError::Api(format!(
                "Could not determine a data directory; set {}",
                DATA_DIR_ENV
            ))
        })
}

/// Resolves the data directory, reads the config, starts logging and loads
/// the book, in that order, so the load is already logged.
pub fn initialize(verbose: bool) -> Result<BotContext> {
    let dir = data_dir()?;
    let config = BotConfig::load(&dir).unwrap_or_default();
    let log_warning = init_logging(effective_level(verbose, &config.log_level)).err();

    let store = FileStore::new(dir.clone());
    let api = BotApi::open(store, dir);
    Ok(BotContext {
        api,
        config,
        log_warning,
    })
}
