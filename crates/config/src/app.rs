//! Application configuration
//!
//! Everything the agent reports about the application when it registers
//! with the daemon.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Length of a valid license key
pub const LICENSE_KEY_LENGTH: usize = 40;

/// Default span queue size for an infinite-tracing trace observer
pub const DEFAULT_SPAN_QUEUE_SIZE: u64 = 100_000;

/// Default trace observer port
pub const DEFAULT_TRACE_OBSERVER_PORT: u16 = 443;

/// `[app]` section
///
/// # Example
///
/// ```toml
/// [app]
/// license = "0123456789abcdef0123456789abcdef01234567"
/// name = "Checkout;Storefront"
/// language = "php"
/// version = "10.0.0"
///
/// [app.labels]
/// env = "prod"
/// team = "payments"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// 40 character license key (required)
    pub license: String,

    /// Application name; `;` separates rollup names (required)
    pub name: String,

    /// Agent language reported to the daemon
    pub language: String,

    /// Agent version reported to the daemon
    pub version: String,

    /// Enable high security mode
    pub high_security: bool,

    /// Collector host override
    pub redirect_collector: Option<String>,

    /// Host name shown in the UI instead of the system host name
    pub display_host: Option<String>,

    /// Labels attached to the application
    pub labels: BTreeMap<String, String>,

    /// Language agent security policies token
    pub security_policies_token: Option<String>,

    /// Infinite tracing trace observer
    pub trace_observer: TraceObserverConfig,
}

/// `[app.trace_observer]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TraceObserverConfig {
    /// Trace observer host; tracing is off when unset
    pub host: Option<String>,

    /// Default: 443
    pub port: u16,

    /// Spans buffered for the observer
    /// Default: 100000
    pub span_queue_size: u64,
}

impl Default for TraceObserverConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_TRACE_OBSERVER_PORT,
            span_queue_size: DEFAULT_SPAN_QUEUE_SIZE,
        }
    }
}
