//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub plugins: PluginConfig,
    pub reporting: ReportingConfig,
    pub storage: StorageConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "cogbot".to_string(),
            prefix: "!".to_string(),
        }
    }
}

/// Which bundled plugins to compose; absent means all of them
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PluginConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ReportingConfig {
    /// Send errors as rich messages instead of the text template
    pub rich: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    #[default]
    Memory,
    Json,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConsoleConfig {
    pub user_id: String,
    pub channel: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            user_id: "0".to_string(),
            channel: "console".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path.as_ref(), self.to_yaml()?)
            .map_err(|e| ConfigError::InvalidValue(format!("Failed to write config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue(
                "bot.prefix must not contain whitespace".to_string(),
            ));
        }
        if let Some(enabled) = &self.plugins.enabled {
            if enabled.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "plugins.enabled lists no plugins".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn load_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Environment overrides on top of whatever was loaded
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(
            std::env::var("COGBOT_PREFIX").ok(),
            std::env::var("COGBOT_STORAGE_PATH").ok(),
        )
    }

    /// Override prefix and storage path, then validate the result
    pub fn apply_overrides(
        &mut self,
        prefix: Option<String>,
        storage_path: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(prefix) = prefix {
            self.bot.prefix = prefix;
        }
        if let Some(path) = storage_path {
            self.storage.path = PathBuf::from(path);
        }
        self.validate()
    }
}
