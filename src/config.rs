//! Configuration handling for sql-diff
//!
//! Configuration feeds the optional AI features only; the parse/diff/generate
//! pipeline needs none. Precedence: environment variables > config file >
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable names recognized by [`Config::load`]
pub const ENV_VARS: [&str; 6] = [
    "SQL_DIFF_AI_ENABLED",
    "SQL_DIFF_AI_PROVIDER",
    "SQL_DIFF_AI_API_KEY",
    "SQL_DIFF_AI_ENDPOINT",
    "SQL_DIFF_AI_MODEL",
    "SQL_DIFF_AI_TIMEOUT",
];

/// Represents the complete sql-diff configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,
}

/// AI provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AiConfig {
    pub enabled: bool,
    /// Provider name: "deepseek" or "openai"
    pub provider: String,
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: "deepseek".to_string(),
            api_key: String::new(),
            api_endpoint: "https://api.deepseek.com/v1".to_string(),
            model: "deepseek-chat".to_string(),
            timeout: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file (if present) with environment
    /// variable overrides applied on top
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("failed to read config file: {}", e)))?;
            serde_yaml::from_str(&contents)
                .map_err(|e| Error::Config(format!("failed to parse config file: {}", e)))?
        } else {
            Config::default()
        };

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Overlay environment values onto the configuration. The lookup is
    /// injected so tests can run without touching process state.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(enabled) = lookup("SQL_DIFF_AI_ENABLED") {
            self.ai.enabled = enabled == "true" || enabled == "1";
        }
        if let Some(provider) = lookup("SQL_DIFF_AI_PROVIDER") {
            if !provider.is_empty() {
                self.ai.provider = provider;
            }
        }
        if let Some(api_key) = lookup("SQL_DIFF_AI_API_KEY") {
            if !api_key.is_empty() {
                self.ai.api_key = api_key;
            }
        }
        if let Some(endpoint) = lookup("SQL_DIFF_AI_ENDPOINT") {
            if !endpoint.is_empty() {
                self.ai.api_endpoint = endpoint;
            }
        }
        if let Some(model) = lookup("SQL_DIFF_AI_MODEL") {
            if !model.is_empty() {
                self.ai.model = model;
            }
        }
        if let Some(timeout) = lookup("SQL_DIFF_AI_TIMEOUT") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.ai.timeout = timeout;
            }
        }
    }

    /// Render the configuration as shell `export` lines
    pub fn save_to_env(&self) -> Vec<String> {
        let mut exports = vec![format!(
            "export SQL_DIFF_AI_ENABLED={}",
            if self.ai.enabled { "true" } else { "false" }
        )];

        if !self.ai.provider.is_empty() {
            exports.push(format!("export SQL_DIFF_AI_PROVIDER={}", self.ai.provider));
        }
        if !self.ai.api_key.is_empty() {
            exports.push(format!("export SQL_DIFF_AI_API_KEY={}", self.ai.api_key));
        }
        if !self.ai.api_endpoint.is_empty() {
            exports.push(format!("export SQL_DIFF_AI_ENDPOINT={}", self.ai.api_endpoint));
        }
        if !self.ai.model.is_empty() {
            exports.push(format!("export SQL_DIFF_AI_MODEL={}", self.ai.model));
        }
        if self.ai.timeout > 0 {
            exports.push(format!("export SQL_DIFF_AI_TIMEOUT={}", self.ai.timeout));
        }

        exports
    }

    /// Validate that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.ai.enabled {
            if self.ai.api_key.is_empty() {
                return Err(Error::Config(
                    "AI is enabled but no API key is configured".to_string(),
                ));
            }
            if self.ai.api_endpoint.is_empty() {
                return Err(Error::Config(
                    "AI is enabled but no API endpoint is configured".to_string(),
                ));
            }
        }
        Ok(())
    }
}
