//! Configuration validation
//!
//! Validates what the daemon would otherwise reject at registration:
//! - License and app name are present
//! - License has the expected length
//! - Labels fit the label limits
//! - Trace observer has a usable port
//!
//! Sample limits are normalized rather than validated; see [`crate::limits`].

use crate::Config;
use crate::app::{AppConfig, LICENSE_KEY_LENGTH};
use crate::error::{ConfigError, Result};

/// Most labels an application may carry
pub const MAX_LABELS: usize = 64;

/// Longest label key or value, in bytes
pub const MAX_LABEL_LENGTH: usize = 255;

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_app(&config.app)?;
    validate_labels(&config.app)?;
    validate_trace_observer(&config.app)?;
    Ok(())
}

fn validate_app(app: &AppConfig) -> Result<()> {
    if app.license.trim().is_empty() {
        return Err(ConfigError::missing_field("app", "license"));
    }

    let license_len = app.license.trim().len();
    if license_len != LICENSE_KEY_LENGTH {
        return Err(ConfigError::invalid_value(
            "app",
            "license",
            format!("must be {LICENSE_KEY_LENGTH} characters, got {license_len}"),
        ));
    }

    if app.name.trim().is_empty() {
        return Err(ConfigError::missing_field("app", "name"));
    }

    Ok(())
}

fn validate_labels(app: &AppConfig) -> Result<()> {
    if app.labels.len() > MAX_LABELS {
        return Err(ConfigError::invalid_value(
            "app",
            "labels",
            format!("at most {MAX_LABELS} labels allowed, got {}", app.labels.len()),
        ));
    }

    for (key, value) in &app.labels {
        if key.is_empty() || value.is_empty() {
            return Err(ConfigError::invalid_value(
                "app",
                format!("labels.{key}"),
                "label keys and values must not be empty",
            ));
        }

        if key.len() > MAX_LABEL_LENGTH || value.len() > MAX_LABEL_LENGTH {
            return Err(ConfigError::invalid_value(
                "app",
                format!("labels.{key}"),
                format!("label keys and values are limited to {MAX_LABEL_LENGTH} bytes"),
            ));
        }
    }

    Ok(())
}

fn validate_trace_observer(app: &AppConfig) -> Result<()> {
    if app.trace_observer.host.is_some() && app.trace_observer.port == 0 {
        return Err(ConfigError::invalid_value(
            "app",
            "trace_observer.port",
            "must be non-zero when a host is set",
        ));
    }

    Ok(())
}
