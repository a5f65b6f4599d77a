use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/frontend.json";

pub const ENV_BOOTSTRAP: &str = "CC_BOOTSTRAP";
pub const ENV_API_KEY: &str = "CC_API_KEY";
pub const ENV_API_SECRET: &str = "CC_API_SECRET";
pub const ENV_SR_URL: &str = "CC_SR_URL";
pub const ENV_SR_USER: &str = "CC_SR_USER";
pub const ENV_SR_PASSWORD: &str = "CC_SR_PASSWORD";
pub const ENV_RAW_PROMPT_TOPIC: &str = "FRONTEND_RAW_PROMPT_TOPIC";
pub const ENV_PROMPT_ANSWER_TOPIC: &str = "FRONTEND_PROMPT_ANSWER_TOPIC";
pub const ENV_SETTLE_SECS: &str = "FRONTEND_SETTLE_SECS";
pub const ENV_POLL_TIMEOUT_MS: &str = "FRONTEND_POLL_TIMEOUT_MS";
pub const ENV_CONSUMER_GROUP: &str = "FRONTEND_CONSUMER_GROUP";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required setting `{0}` is empty")]
    Missing(&'static str),

    #[error("setting `{name}` has invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Kafka connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerSettings {
    pub bootstrap: String,
    pub api_key: String,
    pub api_secret: String,
    pub group_id: String,
    pub auto_offset_reset: String,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            bootstrap: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            group_id: "genai-frontend".to_string(),
            auto_offset_reset: "earliest".to_string(),
        }
    }
}

/// Schema registry connection parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    pub url: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Topics {
    pub raw_prompt: String,
    pub prompt_answer: String,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            raw_prompt: "frontend_raw_prompt".to_string(),
            prompt_answer: "frontend_prompt_answer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub broker: BrokerSettings,
    pub registry: RegistrySettings,
    pub topics: Topics,
    /// Wait between the flush and the first poll.
    pub settle_secs: u64,
    /// Window of a single poll before it reports an empty result.
    pub poll_timeout_ms: u64,
    pub flush_timeout_secs: u64,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            broker: BrokerSettings::default(),
            registry: RegistrySettings::default(),
            topics: Topics::default(),
            settle_secs: 10,
            poll_timeout_ms: 1_000,
            flush_timeout_secs: 30,
        }
    }
}

impl FrontendConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn flush_timeout(&self) -> Duration {
        Duration::from_secs(self.flush_timeout_secs)
    }

    /// Overlays values from a variable lookup. Unset variables leave the
    /// current value alone.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let strings: [(&str, &mut String); 9] = [
            (ENV_BOOTSTRAP, &mut self.broker.bootstrap),
            (ENV_API_KEY, &mut self.broker.api_key),
            (ENV_API_SECRET, &mut self.broker.api_secret),
            (ENV_CONSUMER_GROUP, &mut self.broker.group_id),
            (ENV_SR_URL, &mut self.registry.url),
            (ENV_SR_USER, &mut self.registry.user),
            (ENV_SR_PASSWORD, &mut self.registry.password),
            (ENV_RAW_PROMPT_TOPIC, &mut self.topics.raw_prompt),
            (ENV_PROMPT_ANSWER_TOPIC, &mut self.topics.prompt_answer),
        ];
        for (name, slot) in strings {
            if let Some(value) = lookup(name) {
                *slot = value;
            }
        }

        if let Some(value) = lookup(ENV_SETTLE_SECS) {
            self.settle_secs = parse_number(ENV_SETTLE_SECS, value)?;
        }
        if let Some(value) = lookup(ENV_POLL_TIMEOUT_MS) {
            self.poll_timeout_ms = parse_number(ENV_POLL_TIMEOUT_MS, value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            (ENV_BOOTSTRAP, &self.broker.bootstrap),
            (ENV_SR_URL, &self.registry.url),
            (ENV_RAW_PROMPT_TOPIC, &self.topics.raw_prompt),
            (ENV_PROMPT_ANSWER_TOPIC, &self.topics.prompt_answer),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name));
            }
        }
        if self.poll_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                name: ENV_POLL_TIMEOUT_MS,
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_number(name: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid { name, value })
}

pub fn load_config_file(path: &str) -> FrontendConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<FrontendConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                FrontendConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            FrontendConfig::default()
        }
    }
}

/// File (or defaults), then process environment, then validation.
pub fn load_config(path: &str) -> Result<FrontendConfig, ConfigError> {
    let mut config = load_config_file(path);
    config.apply_overrides(|name| env::var(name).ok())?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_wait_ten_seconds() {
        let config = FrontendConfig::default();
        assert_eq!(config.settle(), Duration::from_secs(10));
        assert_eq!(config.broker.auto_offset_reset, "earliest");
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config: FrontendConfig = serde_json::from_str(
            r#"{"broker":{"bootstrap":"file:9092"},"topics":{"raw_prompt":"from-file"}}"#,
        )
        .unwrap();
        config
            .apply_overrides(lookup(&[
                (ENV_BOOTSTRAP, "env:9092"),
                (ENV_SR_URL, "http://registry:8081"),
                (ENV_SETTLE_SECS, "0"),
            ]))
            .unwrap();

        assert_eq!(config.broker.bootstrap, "env:9092");
        assert_eq!(config.topics.raw_prompt, "from-file");
        assert_eq!(config.topics.prompt_answer, "frontend_prompt_answer");
        assert_eq!(config.settle_secs, 0);
        assert_eq!(config.broker.group_id, "genai-frontend");
        config.validate().unwrap();
    }

    #[test]
    fn rejects_non_numeric_durations() {
        let mut config = FrontendConfig::default();
        let err = config
            .apply_overrides(lookup(&[(ENV_POLL_TIMEOUT_MS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: ENV_POLL_TIMEOUT_MS, .. }));
    }

    #[test]
    fn missing_bootstrap_fails_validation() {
        let config = FrontendConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing(ENV_BOOTSTRAP))
        ));
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let config = load_config_file("does/not/exist.json");
        assert_eq!(config.topics.raw_prompt, "frontend_raw_prompt");
    }
}
