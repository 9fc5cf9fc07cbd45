use crate::error::ConfigError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: u32 = 3;
pub const DEFAULT_RESTORE_DELAY_MS: u32 = 1500;

/// Host-supplied settings. Every field is optional in the JSON form and
/// falls back to the stock guest session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub user: String,
    pub host: String,
    pub home: String,
    pub escalation_threshold: u32,
    pub restore_delay_ms: u32,
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            user: "guest".into(),
            host: "frqise_web".into(),
            home: "/home/guest".into(),
            escalation_threshold: DEFAULT_THRESHOLD,
            restore_delay_ms: DEFAULT_RESTORE_DELAY_MS,
            log_level: "info".into(),
        }
    }
}

impl ShellConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: ShellConfig = serde_json::from_str(json)?;
        if cfg.escalation_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        cfg.level_filter()?;
        Ok(cfg)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
