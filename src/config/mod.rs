#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

/// Resolved runtime settings: CLI flags over TOML over defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub model_path: String,
    pub allow_credentials: bool,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl AppConfig {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            host: config.server.host.clone(),
            // 已在 validate 中檢查範圍
            port: config.server.port as u16,
            model_path: config.model.path.clone(),
            allow_credentials: config.cors.allow_credentials,
            log_level: config.log_level().map(str::to_string),
            json_logs: config.json_logs(),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: toml_config::DEFAULT_HOST.to_string(),
            port: toml_config::DEFAULT_PORT,
            model_path: toml_config::DEFAULT_MODEL_PATH.to_string(),
            allow_credentials: true,
            log_level: None,
            json_logs: false,
        }
    }
}

impl ConfigProvider for AppConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn allow_credentials(&self) -> bool {
        self.allow_credentials
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("host", &self.host)?;
        crate::utils::validation::validate_range("port", self.port, 1, u16::MAX)?;
        crate::utils::validation::validate_path("model_path", &self.model_path)?;
        if let Some(level) = &self.log_level {
            crate::utils::validation::validate_one_of(
                "log_level",
                level,
                &toml_config::LOG_LEVELS,
            )?;
        }
        Ok(())
    }
}
