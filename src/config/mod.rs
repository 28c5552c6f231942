//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Server configuration
///
/// Loaded from a YAML file, with environment overrides applied on top so a
/// deployment can pin the bind address without editing the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Filter directive for the tracing subscriber (overridden by RUST_LOG)
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply environment variable overrides (`INVOICER_ADDR`)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(addr) = std::env::var("INVOICER_ADDR") {
            self.bind_addr = addr;
        }
        self
    }
}
