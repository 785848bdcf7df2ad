//! Relay Configuration
//!
//! TOML-based configuration for the application the agent registers with
//! the daemon. Only `[app]` license and name are required; everything else
//! has a default.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use relay_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str(
//!     "[app]\nlicense = \"0123456789abcdef0123456789abcdef01234567\"\nname = \"My App\"",
//! )
//! .unwrap();
//! assert_eq!(config.app.name, "My App");
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [app]
//! license = "0123456789abcdef0123456789abcdef01234567"
//! name = "My App"
//!
//! [app.labels]
//! env = "prod"
//!
//! [limits]
//! span_events_max_samples_stored = 5000
//!
//! [log]
//! level = "debug"
//! ```

mod app;
mod error;
mod limits;
mod logging;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use app::{
    AppConfig, DEFAULT_SPAN_QUEUE_SIZE, DEFAULT_TRACE_OBSERVER_PORT, LICENSE_KEY_LENGTH,
    TraceObserverConfig,
};
pub use error::{ConfigError, Result};
pub use limits::{LimitsConfig, MAX_CUSTOM_EVENTS, MAX_LOG_EVENTS, MAX_SPAN_EVENTS, SampleLimits};
pub use logging::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use validation::{MAX_LABEL_LENGTH, MAX_LABELS};

use relay_protocol::AppInfo;
use serde::Deserialize;
use serde_json::{Value, json};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application identity and registration settings
    pub app: AppConfig,

    /// Event sample caps
    pub limits: LimitsConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Build the application record sent in the registration message
    ///
    /// Sample caps are normalized here; out-of-range values are logged and
    /// replaced by their defaults.
    pub fn app_info(&self) -> AppInfo {
        let app = &self.app;
        let limits = self.limits.normalize();

        let mut info = AppInfo::new(app.license.trim(), app.name.trim());
        info.lang = app.language.clone();
        info.version = app.version.clone();
        info.high_security = app.high_security;
        info.redirect_collector = app.redirect_collector.clone();
        info.host_display_name = app.display_host.clone();
        info.security_policies_token = app.security_policies_token.clone();
        info.labels = labels_json(app);

        if let Some(host) = &app.trace_observer.host {
            info.trace_observer_host = Some(host.clone());
            info.trace_observer_port = app.trace_observer.port;
            info.span_queue_size = app.trace_observer.span_queue_size;
        }

        info.span_events_max_samples_stored = limits.span_events;
        info.log_events_max_samples_stored = limits.log_events;
        info.custom_events_max_samples_stored = limits.custom_events;
        info
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Labels in the daemon's `[{"label_type":..,"label_value":..}]` form
fn labels_json(app: &AppConfig) -> Option<Value> {
    if app.labels.is_empty() {
        return None;
    }

    let labels = app
        .labels
        .iter()
        .map(|(key, value)| json!({ "label_type": key, "label_value": value }))
        .collect();
    Some(Value::Array(labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;

    const LICENSE: &str = "0123456789abcdef0123456789abcdef01234567";

    fn minimal_toml() -> String {
        format!("[app]\nlicense = \"{LICENSE}\"\nname = \"My App\"\n")
    }

    #[test]
    fn test_minimal_config() {
        let config = Config::from_str(&minimal_toml()).unwrap();
        assert_eq!(config.app.license, LICENSE);
        assert_eq!(config.limits, LimitsConfig::default());
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_empty_config_is_rejected() {
        assert!(matches!(
            Config::from_str(""),
            Err(ConfigError::MissingField { field: "license", .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_full_config_parse() {
        let toml = format!(
            r#"
[app]
license = "{LICENSE}"
name = "Checkout;Storefront"
language = "php"
version = "10.0.0"
high_security = true
redirect_collector = "collector.example.com"
display_host = "web-frontend"
security_policies_token = "ffff-0000"

[app.labels]
env = "prod"
team = "payments"

[app.trace_observer]
host = "trace.example.com"
span_queue_size = 5000

[limits]
span_events_max_samples_stored = 5000
log_events_max_samples_stored = 0
custom_events_max_samples_stored = -1

[log]
level = "debug"
format = "json"
"#
        );
        let config = Config::from_str(&toml).unwrap();
        let info = config.app_info();

        assert_eq!(info.license, LICENSE);
        assert_eq!(info.appname, "Checkout;Storefront");
        assert_eq!(info.lang, "php");
        assert_eq!(info.version, "10.0.0");
        assert!(info.high_security);
        assert_eq!(info.redirect_collector.as_deref(), Some("collector.example.com"));
        assert_eq!(info.host_display_name.as_deref(), Some("web-frontend"));
        assert_eq!(info.security_policies_token.as_deref(), Some("ffff-0000"));
        assert_eq!(
            info.labels,
            Some(json!([
                {"label_type": "env", "label_value": "prod"},
                {"label_type": "team", "label_value": "payments"}
            ]))
        );
        assert_eq!(info.trace_observer_host.as_deref(), Some("trace.example.com"));
        assert_eq!(info.trace_observer_port, 443);
        assert_eq!(info.span_queue_size, 5000);

        assert_eq!(info.span_events_max_samples_stored, 5000);
        assert_eq!(info.log_events_max_samples_stored, 10_000);
        assert_eq!(info.custom_events_max_samples_stored, 30_000);

        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_app_info_without_observer_or_labels() {
        let config = Config::from_str(&minimal_toml()).unwrap();
        let info = config.app_info();

        assert_eq!(info.labels, None);
        assert_eq!(info.trace_observer_host, None);
        assert_eq!(info.trace_observer_port, 0);
        assert_eq!(info.span_queue_size, 0);
        assert_eq!(info.span_events_max_samples_stored, 2_000);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(minimal_toml().as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.app.name, "My App");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
