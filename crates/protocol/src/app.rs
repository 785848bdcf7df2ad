//! Application records shared with the daemon
//!
//! [`AppInfo`] is what the agent knows about itself and sends in the
//! registration message. [`App`] is the run-time record the reply decoder
//! updates: connection state, run id, harvest timing and per-category limits.
//!
//! No locking happens here. One application record must be updated by at
//! most one in-flight reply at a time.

use std::time::Duration;

use serde_json::Value;

/// Harvest cycle used when the daemon does not send one (seconds)
pub const DEFAULT_HARVEST_FREQUENCY_SECS: u16 = 60;

/// Adaptive sampling target used when the daemon does not send one
pub const DEFAULT_SAMPLING_TARGET: u16 = 10;

/// Default cap for transaction analytics events per harvest
pub const DEFAULT_ANALYTIC_EVENTS: u64 = 10_000;

/// Default cap for error events per harvest
pub const DEFAULT_ERROR_EVENTS: u64 = 100;

/// Default `max_samples_stored` for span events
pub const DEFAULT_SPAN_EVENTS: u64 = 2_000;

/// Default `max_samples_stored` for log events
pub const DEFAULT_LOG_EVENTS: u64 = 10_000;

/// Default `max_samples_stored` for custom events
pub const DEFAULT_CUSTOM_EVENTS: u64 = 30_000;

/// Everything the agent reports about itself when registering
///
/// `license` and `appname` are required for a valid registration; the
/// remaining fields are optional and omitted from the wire when unset.
/// JSON-valued fields are serialized to strings by the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct AppInfo {
    pub license: String,
    pub appname: String,
    pub lang: String,
    pub version: String,
    pub high_security: bool,
    pub redirect_collector: Option<String>,
    pub environment: Option<Value>,
    pub settings: Option<Value>,
    pub labels: Option<Value>,
    pub host_display_name: Option<String>,
    pub security_policies_token: Option<String>,
    pub supported_security_policies: Option<Value>,
    pub trace_observer_host: Option<String>,
    pub trace_observer_port: u16,
    pub span_queue_size: u64,
    pub span_events_max_samples_stored: u64,
    pub log_events_max_samples_stored: u64,
    pub custom_events_max_samples_stored: u64,
    pub metadata: Option<Value>,
}

impl AppInfo {
    /// Create an info record with the two required fields set
    pub fn new(license: impl Into<String>, appname: impl Into<String>) -> Self {
        Self {
            license: license.into(),
            appname: appname.into(),
            lang: String::new(),
            version: String::new(),
            high_security: false,
            redirect_collector: None,
            environment: None,
            settings: None,
            labels: None,
            host_display_name: None,
            security_policies_token: None,
            supported_security_policies: None,
            trace_observer_host: None,
            trace_observer_port: 0,
            span_queue_size: 0,
            span_events_max_samples_stored: 0,
            log_events_max_samples_stored: 0,
            custom_events_max_samples_stored: 0,
            metadata: None,
        }
    }
}

/// Connection state of an application as far as the agent knows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AppState {
    /// Not yet registered, or the daemon asked for a new registration
    #[default]
    Unknown,
    /// Connected; data may be sent
    Ok,
    /// Rejected by the daemon (e.g. invalid license); stop sending
    Invalid,
}

impl AppState {
    /// Get the string name of this state
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Ok => "ok",
            Self::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Harvest cadence and sampling settings from the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestTiming {
    /// Daemon connect time (seconds since epoch), 0 if unknown
    pub connect_timestamp: u64,
    /// Time between harvests
    pub frequency: Duration,
    /// Target number of sampled transactions per harvest
    pub sampling_target: u16,
}

impl HarvestTiming {
    /// Build timing from raw reply values; zero means "use the default"
    pub fn new(connect_timestamp: u64, frequency_secs: u16, sampling_target: u16) -> Self {
        let frequency_secs = match frequency_secs {
            0 => DEFAULT_HARVEST_FREQUENCY_SECS,
            secs => secs,
        };
        let sampling_target = match sampling_target {
            0 => DEFAULT_SAMPLING_TARGET,
            target => target,
        };

        Self {
            connect_timestamp,
            frequency: Duration::from_secs(u64::from(frequency_secs)),
            sampling_target,
        }
    }
}

impl Default for HarvestTiming {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Per-category event caps applied at encode time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLimits {
    pub analytics_events: u64,
    pub custom_events: u64,
    pub error_events: u64,
    pub span_events: u64,
    pub log_events: u64,
}

impl AppLimits {
    /// Limits before the daemon has sent any harvest configuration
    pub fn from_info(info: &AppInfo) -> Self {
        Self {
            analytics_events: DEFAULT_ANALYTIC_EVENTS,
            custom_events: info.custom_events_max_samples_stored,
            error_events: DEFAULT_ERROR_EVENTS,
            span_events: info.span_events_max_samples_stored,
            log_events: info.log_events_max_samples_stored,
        }
    }
}

impl Default for AppLimits {
    fn default() -> Self {
        Self {
            analytics_events: DEFAULT_ANALYTIC_EVENTS,
            custom_events: DEFAULT_CUSTOM_EVENTS,
            error_events: DEFAULT_ERROR_EVENTS,
            span_events: DEFAULT_SPAN_EVENTS,
            log_events: DEFAULT_LOG_EVENTS,
        }
    }
}

/// Run-time record of one application, updated from daemon replies
#[derive(Debug, Clone, PartialEq)]
pub struct App {
    pub info: AppInfo,
    pub state: AppState,
    pub agent_run_id: Option<String>,
    pub entity_guid: Option<String>,
    /// Full connect reply from the collector, as JSON
    pub connect_reply: Option<Value>,
    pub security_policies: Option<Value>,
    pub harvest: HarvestTiming,
    pub limits: AppLimits,
}

impl App {
    /// Create an unregistered application
    pub fn new(info: AppInfo) -> Self {
        let limits = AppLimits::from_info(&info);
        Self {
            info,
            state: AppState::Unknown,
            agent_run_id: None,
            entity_guid: None,
            connect_reply: None,
            security_policies: None,
            harvest: HarvestTiming::default(),
            limits,
        }
    }
}
