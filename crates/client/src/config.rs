use serde::Deserialize;

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the notification API, e.g. `https://api.teamdesk.example`.
    pub base_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Environment variable the bearer token is read from at startup.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Interval between successful poll ticks.
    #[serde(default = "default_base_interval")]
    pub base_interval_secs: u64,

    /// Upper bound for the backoff delay after consecutive failures.
    #[serde(default = "default_max_interval")]
    pub max_interval_secs: u64,

    /// Consecutive failures after which polling pauses until the next
    /// user-visible interaction.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// Relative jitter applied to every delay, in `[0, 1)`.
    #[serde(default = "default_jitter_ratio")]
    pub jitter_ratio: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            base_interval_secs: default_base_interval(),
            max_interval_secs: default_max_interval(),
            failure_threshold: default_failure_threshold(),
            jitter_ratio: default_jitter_ratio(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_token_env() -> String {
    "TEAMDESK_API_TOKEN".to_string()
}
fn default_base_interval() -> u64 {
    30
}
fn default_max_interval() -> u64 {
    480
}
fn default_failure_threshold() -> u32 {
    5
}
fn default_jitter_ratio() -> f64 {
    0.1
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

/// Configuration validation error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl ClientConfig {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with TD__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("TD").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "api.base_url".to_string(),
            ));
        }
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(ConfigValidationError::InvalidValue(
                "api.base_url must start with http:// or https://".to_string(),
            ));
        }
        if self.poll.base_interval_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "poll.base_interval_secs must be positive".to_string(),
            ));
        }
        if self.poll.max_interval_secs < self.poll.base_interval_secs {
            return Err(ConfigValidationError::InvalidValue(
                "poll.max_interval_secs must be >= poll.base_interval_secs".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.poll.jitter_ratio) {
            return Err(ConfigValidationError::InvalidValue(
                "poll.jitter_ratio must be in [0, 1)".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a configuration from inline TOML, for tests that must not
    /// depend on config files on disk.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [api]
            base_url = "http://localhost:8080"
            timeout_ms = 10000
            token_env = "TEAMDESK_API_TOKEN"

            [poll]
            base_interval_secs = 30
            max_interval_secs = 480
            failure_threshold = 5
            jitter_ratio = 0.1

            [logging]
            level = "info"
            format = "pretty"
        "#;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            defaults,
            config::FileFormat::Toml,
        ));
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_for_test_defaults() {
        let cfg = ClientConfig::load_for_test(&[]).unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:8080");
        assert_eq!(cfg.poll.base_interval_secs, 30);
        assert_eq!(cfg.poll.failure_threshold, 5);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_rejects_empty_base_url() {
        let result = ClientConfig::load_for_test(&[("api.base_url", " ")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let result = ClientConfig::load_for_test(&[("api.base_url", "ftp://example.com")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_inverted_poll_intervals() {
        let result = ClientConfig::load_for_test(&[("poll.max_interval_secs", "5")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_jitter() {
        let result = ClientConfig::load_for_test(&[("poll.jitter_ratio", "1.5")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_poll_config_default() {
        let poll = PollConfig::default();
        assert_eq!(poll.base_interval_secs, 30);
        assert_eq!(poll.max_interval_secs, 480);
    }
}
