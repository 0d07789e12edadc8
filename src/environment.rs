// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub backend_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            anyhow::bail!(
                "config.yaml not found in current directory. Client cannot start without configuration."
            );
        }

        let config_content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;

        Self::from_yaml(&config_content, &environment)
    }

    fn get_environment() -> String {
        std::env::var("CRYPGO_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse config.yaml")?;

        let config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        if config.backend_url.is_empty() {
            anyhow::bail!("backend_url must not be empty");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
local:
  backend_url: "http://localhost:8080"
  timeout_seconds: 5
production:
  backend_url: "https://api.crypgo.example"
"#;

    #[test]
    fn selects_section_by_environment() {
        let local = EnvironmentConfig::from_yaml(CONFIG, "local").unwrap();
        assert_eq!(local.backend_url, "http://localhost:8080");
        assert_eq!(local.timeout_seconds, 5);

        let production = EnvironmentConfig::from_yaml(CONFIG, "production").unwrap();
        assert_eq!(production.backend_url, "https://api.crypgo.example");
        assert_eq!(production.timeout_seconds, 30);
    }

    #[test]
    fn unknown_environment_falls_back_to_local() {
        let config = EnvironmentConfig::from_yaml(CONFIG, "staging").unwrap();
        assert_eq!(config.backend_url, "http://localhost:8080");
    }
}
