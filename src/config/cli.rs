use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "cardio-api")]
#[command(about = "HTTP API serving a pre-trained cardiovascular risk model")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Path to the serialized model artifact
    #[arg(long)]
    pub model_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 合併 TOML 與命令列覆蓋設定
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_toml(&TomlConfig::from_file(path)?)?,
            None => AppConfig::default(),
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(model_path) = &self.model_path {
            config.model_path = model_path.clone();
        }
        if self.json_logs {
            config.json_logs = true;
        }

        config.validate()?;
        Ok(config)
    }
}
