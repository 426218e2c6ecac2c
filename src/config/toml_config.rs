use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AgendaError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "agenda.db".to_string(),
            pool_size: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub enabled: bool,
    pub base_url: Option<String>,
    pub personas_path: String,
    pub timeout_seconds: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: None,
            personas_path: "/api/personas".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AgendaError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AgendaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SYNC_API_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AgendaError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 設定遠端同步的目標並啟用同步
    pub fn enable_sync(&mut self, base_url: impl Into<String>) {
        self.sync.base_url = Some(base_url.into());
        self.sync.enabled = true;
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_positive_number("server.port", self.server.port as usize, 1)?;

        validation::validate_path("database.path", &self.database.path)?;
        validation::validate_range("database.pool_size", self.database.pool_size, 1, 64)?;

        if self.sync.enabled {
            let base_url = validation::validate_required_field("sync.base_url", &self.sync.base_url)?;
            validation::validate_url("sync.base_url", base_url)?;
            validation::validate_range("sync.timeout_seconds", self.sync.timeout_seconds, 1, 300)?;

            if !self.sync.personas_path.starts_with('/') {
                return Err(AgendaError::InvalidConfigValueError {
                    field: "sync.personas_path".to_string(),
                    value: self.sync.personas_path.clone(),
                    reason: "Path must start with '/'".to_string(),
                });
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(AgendaError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Unsupported level. Valid levels: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn database_path(&self) -> &str {
        &self.database.path
    }

    fn pool_size(&self) -> u32 {
        self.database.pool_size
    }

    fn sync_base_url(&self) -> Option<&str> {
        if self.sync.enabled {
            self.sync.base_url.as_deref()
        } else {
            None
        }
    }

    fn sync_personas_path(&self) -> &str {
        &self.sync.personas_path
    }

    fn sync_timeout_seconds(&self) -> u64 {
        self.sync.timeout_seconds
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
