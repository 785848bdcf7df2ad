//! App (registration request) encoding

use bytes::Bytes;
use serde_json::Value;

use super::{add_opt_offset, prepend_opt_string};
use crate::app::AppInfo;
use crate::builder::{FlatBuilder, WireOffset};
use crate::message::{Payload, finish_message};
use crate::schema::app;

/// Build a registration message for an application
///
/// `agent_run_id` is `None` on first connect. `system_host_name` goes into
/// the `host` field; `info.host_display_name` into `display_host`.
pub fn encode_app_query(agent_run_id: Option<&str>, system_host_name: &str, info: &AppInfo) -> Bytes {
    let mut fb = FlatBuilder::with_capacity(512 + info.license.len() + info.appname.len());
    let app = prepend_app(&mut fb, system_host_name, info);
    finish_message(fb, agent_run_id, Payload::App(app))
}

/// Write an `App` table
pub fn prepend_app(fb: &mut FlatBuilder, system_host_name: &str, info: &AppInfo) -> WireOffset {
    // License and app name are always written, even when empty
    let license = fb.create_string(&info.license);
    let appname = fb.create_string(&info.appname);

    let lang = prepend_opt_string(fb, Some(&info.lang));
    let version = prepend_opt_string(fb, Some(&info.version));
    let redirect_collector = prepend_opt_string(fb, info.redirect_collector.as_deref());
    let environment = prepend_json(fb, info.environment.as_ref());
    let settings = prepend_json(fb, info.settings.as_ref());
    let labels = prepend_json(fb, info.labels.as_ref());
    let display_host = prepend_opt_string(fb, info.host_display_name.as_deref());
    let policy_token = prepend_opt_string(fb, info.security_policies_token.as_deref());
    let supported_policies = prepend_json(fb, info.supported_security_policies.as_ref());
    let host = prepend_opt_string(fb, Some(system_host_name));
    let trace_observer_host = prepend_opt_string(fb, info.trace_observer_host.as_deref());
    let metadata = prepend_json(fb, info.metadata.as_ref());

    fb.start_table(app::NUM_FIELDS);

    // 8-byte scalars first, then offsets, then the narrow scalars
    fb.add_u64(app::SPAN_QUEUE_SIZE, info.span_queue_size, 0);
    fb.add_u64(
        app::SPAN_EVENTS_MAX_SAMPLES_STORED,
        info.span_events_max_samples_stored,
        0,
    );
    fb.add_u64(
        app::LOG_EVENTS_MAX_SAMPLES_STORED,
        info.log_events_max_samples_stored,
        0,
    );
    fb.add_u64(
        app::CUSTOM_EVENTS_MAX_SAMPLES_STORED,
        info.custom_events_max_samples_stored,
        0,
    );

    fb.add_offset(app::LICENSE, license);
    fb.add_offset(app::APPNAME, appname);
    add_opt_offset(fb, app::AGENT_LANGUAGE, lang);
    add_opt_offset(fb, app::AGENT_VERSION, version);
    add_opt_offset(fb, app::REDIRECT_COLLECTOR, redirect_collector);
    add_opt_offset(fb, app::ENVIRONMENT, environment);
    add_opt_offset(fb, app::SETTINGS, settings);
    add_opt_offset(fb, app::LABELS, labels);
    add_opt_offset(fb, app::DISPLAY_HOST, display_host);
    add_opt_offset(fb, app::SECURITY_POLICY_TOKEN, policy_token);
    add_opt_offset(fb, app::SUPPORTED_SECURITY_POLICIES, supported_policies);
    add_opt_offset(fb, app::HOST, host);
    add_opt_offset(fb, app::TRACE_OBSERVER_HOST, trace_observer_host);
    add_opt_offset(fb, app::METADATA, metadata);

    fb.add_u16(app::TRACE_OBSERVER_PORT, info.trace_observer_port, 0);
    fb.add_bool(app::HIGH_SECURITY, info.high_security, false);

    fb.end_table()
}

/// Write a JSON value as its compact string form
fn prepend_json(fb: &mut FlatBuilder, value: Option<&Value>) -> Option<WireOffset> {
    value
        .filter(|v| !v.is_null())
        .map(|v| fb.create_string(&v.to_string()))
}
