use crate::commands::{CmdMessage, CmdResult};
use crate::config::BotConfig;
use crate::error::{BotError, Result};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = BotConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = BotConfig::load(dir)?;
            let value = config
                .get(&key)
                .ok_or_else(|| BotError::Api(format!("Unknown config key: {}", key)))?;
            Ok(CmdResult::default().with_message(CmdMessage::info(value)))
        }
        ConfigAction::Set(key, value) => {
            let mut config = BotConfig::load(dir)?;
            config.set(&key, &value).map_err(BotError::Api)?;
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to {}", key, display_val)))
                .with_config(config))
        }
    }
}
