use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YAML rule file; the built-in rule set is used when unset.
    pub rules_path: Option<String>,
    pub store_path: String,
    /// Seed demonstration scans into an empty store.
    pub seed_demo_data: bool,
    pub recent_limit: usize,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rules_path: None,
            store_path: "phishlens-scans.json".to_string(),
            seed_demo_data: true,
            recent_limit: 5,
            logging: Some(LoggingConfig {
                level: "info".to_string(),
            }),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file: {path}"))?;
        Ok(config)
    }

    /// Like `from_file`, but a missing file yields the defaults.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            log::debug!("Config file {path} not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {path}"))?;
        Ok(())
    }

    pub fn log_level(&self) -> Option<LevelFilter> {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("store_path: /tmp/scans.json\n").unwrap();

        assert_eq!(config.store_path, "/tmp/scans.json");
        assert_eq!(config.rules_path, None);
        assert!(config.seed_demo_data);
        assert_eq!(config.recent_limit, 5);
    }

    #[test]
    fn test_config_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("phishlens-config-{}.yaml", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let config = Config {
            rules_path: Some("rules/custom.yaml".to_string()),
            seed_demo_data: false,
            ..Config::default()
        };

        config.to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_config_falls_back_to_default() {
        let config = Config::load_or_default("/nonexistent/phishlens.yaml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_log_level() {
        let mut config = Config::default();
        assert_eq!(config.log_level(), Some(LevelFilter::Info));

        config.logging = Some(LoggingConfig {
            level: "debug".to_string(),
        });
        assert_eq!(config.log_level(), Some(LevelFilter::Debug));

        config.logging = None;
        assert_eq!(config.log_level(), None);
    }
}
