//! Event sample limits
//!
//! Per-harvest caps the agent asks the daemon for. Out-of-range values are
//! not fatal: they fall back to the category default with a warning.

use serde::Deserialize;
use tracing::warn;

use relay_protocol::{DEFAULT_CUSTOM_EVENTS, DEFAULT_LOG_EVENTS, DEFAULT_SPAN_EVENTS};

/// Largest accepted span `max_samples_stored`
pub const MAX_SPAN_EVENTS: u64 = 10_000;

/// Largest accepted log `max_samples_stored`
pub const MAX_LOG_EVENTS: u64 = 20_000;

/// Largest accepted custom event `max_samples_stored`
pub const MAX_CUSTOM_EVENTS: u64 = 100_000;

/// `[limits]` section
///
/// Values are signed so that negative input parses and can be normalized.
///
/// # Example
///
/// ```toml
/// [limits]
/// span_events_max_samples_stored = 5000
/// log_events_max_samples_stored = 10000
/// custom_events_max_samples_stored = 30000
/// ```
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LimitsConfig {
    pub span_events_max_samples_stored: i64,
    pub log_events_max_samples_stored: i64,
    pub custom_events_max_samples_stored: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            span_events_max_samples_stored: DEFAULT_SPAN_EVENTS as i64,
            log_events_max_samples_stored: DEFAULT_LOG_EVENTS as i64,
            custom_events_max_samples_stored: DEFAULT_CUSTOM_EVENTS as i64,
        }
    }
}

/// Sample caps after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLimits {
    pub span_events: u64,
    pub log_events: u64,
    pub custom_events: u64,
}

impl LimitsConfig {
    /// Clamp every cap into its valid range
    pub fn normalize(&self) -> SampleLimits {
        SampleLimits {
            span_events: normalize_cap(
                "span_events_max_samples_stored",
                self.span_events_max_samples_stored,
                DEFAULT_SPAN_EVENTS,
                MAX_SPAN_EVENTS,
            ),
            log_events: normalize_cap(
                "log_events_max_samples_stored",
                self.log_events_max_samples_stored,
                DEFAULT_LOG_EVENTS,
                MAX_LOG_EVENTS,
            ),
            custom_events: normalize_cap(
                "custom_events_max_samples_stored",
                self.custom_events_max_samples_stored,
                DEFAULT_CUSTOM_EVENTS,
                MAX_CUSTOM_EVENTS,
            ),
        }
    }
}

/// `value` when it is in `1..=max`, else `default`
fn normalize_cap(name: &str, value: i64, default: u64, max: u64) -> u64 {
    match u64::try_from(value) {
        Ok(v) if v > 0 && v <= max => v,
        _ => {
            warn!(
                setting = name,
                value,
                max,
                default,
                "invalid max_samples_stored, using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let limits = LimitsConfig::default().normalize();
        assert_eq!(limits.span_events, 2_000);
        assert_eq!(limits.log_events, 10_000);
        assert_eq!(limits.custom_events, 30_000);
    }

    #[test]
    fn test_valid_values_are_kept() {
        let limits = LimitsConfig {
            span_events_max_samples_stored: 10_000,
            log_events_max_samples_stored: 1,
            custom_events_max_samples_stored: 100_000,
        }
        .normalize();
        assert_eq!(limits.span_events, 10_000);
        assert_eq!(limits.log_events, 1);
        assert_eq!(limits.custom_events, 100_000);
    }

    #[test]
    fn test_too_small_falls_back_to_default() {
        let limits = LimitsConfig {
            span_events_max_samples_stored: 0,
            log_events_max_samples_stored: -10,
            custom_events_max_samples_stored: -1,
        }
        .normalize();
        assert_eq!(limits.span_events, 2_000);
        assert_eq!(limits.log_events, 10_000);
        assert_eq!(limits.custom_events, 30_000);
    }

    #[test]
    fn test_too_large_falls_back_to_default() {
        let limits = LimitsConfig {
            span_events_max_samples_stored: 10_001,
            log_events_max_samples_stored: 20_001,
            custom_events_max_samples_stored: 100_001,
        }
        .normalize();
        assert_eq!(limits.span_events, 2_000);
        assert_eq!(limits.log_events, 10_000);
        assert_eq!(limits.custom_events, 30_000);
    }
}
