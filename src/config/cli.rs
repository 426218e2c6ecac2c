use crate::config::toml_config::{AppConfig, LogFormat};
use crate::utils::error::Result;
use clap::Parser;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "agenda.toml";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "agenda")]
#[command(about = "Contact agenda service with REST API and web interface")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./agenda.toml when present)
    #[arg(short, long, env = "AGENDA_CONFIG")]
    pub config: Option<String>,

    #[arg(long, env = "AGENDA_HOST")]
    pub host: Option<String>,

    #[arg(short, long, env = "AGENDA_PORT")]
    pub port: Option<u16>,

    /// SQLite database file, or ":memory:"
    #[arg(long, env = "AGENDA_DATABASE")]
    pub database: Option<String>,

    /// Base URL of the remote agenda that receives new contacts
    #[arg(long, env = "SYNC_API_URL")]
    pub sync_url: Option<String>,

    #[arg(long, help = "Disable remote synchronization")]
    pub no_sync: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入設定檔並套用命令列覆蓋 (命令列 > 環境變數 > 設定檔)
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                AppConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database) = &self.database {
            config.database.path = database.clone();
        }
        if let Some(url) = &self.sync_url {
            config.enable_sync(url.clone());
        }
        if self.no_sync {
            config.sync.enabled = false;
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }
    }
}
