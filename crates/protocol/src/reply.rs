//! Reply decoding
//!
//! Applies the daemon's `AppReply` to an application record: connection
//! state, run id, harvest timing and per-category event limits.
//!
//! Everything that can fail is read before the record is touched, so a
//! failed reply leaves the application exactly as it was.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::app::{
    App, AppInfo, AppLimits, AppState, DEFAULT_ANALYTIC_EVENTS, DEFAULT_ERROR_EVENTS, HarvestTiming,
};
use crate::decode::AppReplyView;
use crate::message::Message;
use crate::schema::AppStatus;
use crate::{ProtocolError, Result};

/// Harvest limit keys in `event_harvest_config.harvest_limits`
pub const ANALYTIC_EVENT_DATA: &str = "analytic_event_data";
pub const CUSTOM_EVENT_DATA: &str = "custom_event_data";
pub const ERROR_EVENT_DATA: &str = "error_event_data";
pub const SPAN_EVENT_DATA: &str = "span_event_data";
pub const LOG_EVENT_DATA: &str = "log_event_data";

/// Apply a daemon reply to `app` and return the status it carried
///
/// `InvalidLicense` marks the app invalid and stops there. `Disconnected`
/// and unrecognized statuses reset it to unknown so the agent registers
/// again. `StillValid` confirms an existing connection. Only `Connected`
/// carries a connect reply to extract.
///
/// # Errors
///
/// Fails if the bytes are not a valid message, the body is not an
/// `AppReply`, or a connected reply lacks a usable connect payload.
pub fn process_reply(data: &[u8], app: &mut App) -> Result<AppStatus> {
    let msg = Message::parse(data)?;
    let reply = msg.app_reply()?;
    let status = reply.status();

    match status {
        AppStatus::InvalidLicense => {
            error!(appname = %app.info.appname, "daemon rejected the license");
            app.state = AppState::Invalid;
        }
        AppStatus::Disconnected => {
            info!(appname = %app.info.appname, "application disconnected, registering again");
            app.state = AppState::Unknown;
        }
        AppStatus::StillValid => {
            debug!(appname = %app.info.appname, "connection still valid");
            app.state = AppState::Ok;
        }
        AppStatus::Unknown => {
            debug!(appname = %app.info.appname, "application status unknown");
            app.state = AppState::Unknown;
        }
        AppStatus::Connected => apply_connected(&reply, app)?,
    }

    Ok(status)
}

fn apply_connected(reply: &AppReplyView<'_>, app: &mut App) -> Result<()> {
    let connect_reply: Value = match reply.connect_reply()? {
        Some(bytes) => serde_json::from_slice(bytes)?,
        None => return Err(ProtocolError::missing_field("connect_reply")),
    };

    let agent_run_id = connect_reply
        .get("agent_run_id")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::missing_field("agent_run_id"))?
        .to_owned();

    let entity_guid = connect_reply
        .get("entity_guid")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let security_policies = match reply.security_policies()? {
        Some(bytes) => Some(serde_json::from_slice::<Value>(bytes)?),
        None => None,
    };

    process_harvest_timing(reply, app);
    process_event_harvest_config(
        connect_reply.get("event_harvest_config"),
        &mut app.limits,
        &app.info,
    );

    info!(
        appname = %app.info.appname,
        agent_run_id = %agent_run_id,
        harvest_secs = app.harvest.frequency.as_secs(),
        "application connected"
    );

    app.state = AppState::Ok;
    app.agent_run_id = Some(agent_run_id);
    app.entity_guid = entity_guid;
    app.security_policies = security_policies;
    app.connect_reply = Some(connect_reply);

    Ok(())
}

/// Copy connect timestamp, harvest frequency and sampling target
///
/// Absent or zero frequency and sampling target fall back to their defaults.
pub fn process_harvest_timing(reply: &AppReplyView<'_>, app: &mut App) {
    app.harvest = HarvestTiming::new(
        reply.connect_timestamp().unwrap_or(0),
        reply.harvest_frequency().unwrap_or(0),
        reply.sampling_target().unwrap_or(0),
    );
}

/// Derive per-category limits from `event_harvest_config`
///
/// Categories missing from the config keep the agent-side default: the
/// sample caps from `info` for custom, span and log events.
pub fn process_event_harvest_config(config: Option<&Value>, limits: &mut AppLimits, info: &AppInfo) {
    let harvest_limits = config.and_then(|c| c.get("harvest_limits"));

    if config.is_some() && harvest_limits.is_none() {
        warn!("event_harvest_config has no harvest_limits, using defaults");
    }

    *limits = AppLimits {
        analytics_events: harvest_limit(harvest_limits, ANALYTIC_EVENT_DATA, DEFAULT_ANALYTIC_EVENTS),
        custom_events: harvest_limit(
            harvest_limits,
            CUSTOM_EVENT_DATA,
            info.custom_events_max_samples_stored,
        ),
        error_events: harvest_limit(harvest_limits, ERROR_EVENT_DATA, DEFAULT_ERROR_EVENTS),
        span_events: harvest_limit(
            harvest_limits,
            SPAN_EVENT_DATA,
            info.span_events_max_samples_stored,
        ),
        log_events: harvest_limit(
            harvest_limits,
            LOG_EVENT_DATA,
            info.log_events_max_samples_stored,
        ),
    };
}

/// Look up one category limit
///
/// Returns the configured value when it is a non-negative integer, else
/// `default`.
///
/// ```
/// use relay_protocol::reply::harvest_limit;
///
/// let limits = serde_json::json!({ "span_event_data": 500 });
/// assert_eq!(harvest_limit(Some(&limits), "span_event_data", 100), 500);
/// assert_eq!(harvest_limit(Some(&limits), "log_event_data", 100), 100);
/// ```
pub fn harvest_limit(limits: Option<&Value>, key: &str, default: u64) -> u64 {
    limits
        .and_then(|l| l.get(key))
        .and_then(Value::as_u64)
        .unwrap_or(default)
}
