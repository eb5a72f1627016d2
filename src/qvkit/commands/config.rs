use crate::commands::{CmdMessage, CmdResult};
use crate::config::QvConfig;
use crate::error::{QvError, Result};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = QvConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = config
                .get(&key)
                .ok_or_else(|| QvError::Config(format!("Unknown config key: {key}")))?;
            result.add_message(CmdMessage::info(format!("{key} = {value}")));
            return Ok(result);
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("{key} set to {value}")));
        }
    }

    Ok(result.with_config(config))
}
