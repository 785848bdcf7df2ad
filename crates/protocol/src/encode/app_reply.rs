//! AppReply encoding (the daemon's side of registration)

use bytes::Bytes;

use crate::builder::FlatBuilder;
use crate::message::{Payload, finish_message};
use crate::schema::{AppStatus, app_reply};

/// Reply values as the daemon would send them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppReply {
    pub status: AppStatus,
    /// Collector connect response, JSON
    pub connect_reply: Option<String>,
    /// Security policies, JSON
    pub security_policies: Option<String>,
    pub connect_timestamp: u64,
    pub harvest_frequency: u16,
    pub sampling_target: u16,
}

impl AppReply {
    /// A reply carrying only a status
    pub fn with_status(status: AppStatus) -> Self {
        Self {
            status,
            connect_reply: None,
            security_policies: None,
            connect_timestamp: 0,
            harvest_frequency: 0,
            sampling_target: 0,
        }
    }
}

/// Build an `AppReply` message (no agent run id)
pub fn encode_app_reply(reply: &AppReply) -> Bytes {
    let mut fb = FlatBuilder::with_capacity(
        256 + reply.connect_reply.as_ref().map_or(0, String::len)
            + reply.security_policies.as_ref().map_or(0, String::len),
    );

    let connect_reply = reply
        .connect_reply
        .as_deref()
        .map(|json| fb.create_bytes(json.as_bytes()));
    let security_policies = reply
        .security_policies
        .as_deref()
        .map(|json| fb.create_bytes(json.as_bytes()));

    fb.start_table(app_reply::NUM_FIELDS);
    fb.add_u64(app_reply::CONNECT_TIMESTAMP, reply.connect_timestamp, 0);
    if let Some(connect_reply) = connect_reply {
        fb.add_offset(app_reply::CONNECT_REPLY, connect_reply);
    }
    if let Some(security_policies) = security_policies {
        fb.add_offset(app_reply::SECURITY_POLICIES, security_policies);
    }
    fb.add_u16(app_reply::HARVEST_FREQUENCY, reply.harvest_frequency, 0);
    fb.add_u16(app_reply::SAMPLING_TARGET, reply.sampling_target, 0);
    fb.add_u8(
        app_reply::STATUS,
        reply.status.as_u8(),
        AppStatus::Unknown.as_u8(),
    );
    let table = fb.end_table();

    finish_message(fb, None, Payload::AppReply(table))
}
