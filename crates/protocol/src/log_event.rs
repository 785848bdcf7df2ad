//! Structured log events
//!
//! A [`LogEvent`] is one forwarded application log line. It is serialized
//! straight to JSON, either on its own or nested inside a transaction payload.
//!
//! # JSON shape
//!
//! ```text
//! {"message":"...","level":"...","trace.id":"...","span.id":"...",
//!  "entity.guid":"...","entity.name":"...","hostname":"...","timestamp":123}
//! ```
//!
//! `message` and `level` are always emitted; when unset or empty the literal
//! string `"null"` is written in their place. The optional fields are only
//! emitted when non-empty, and `timestamp` always comes last as an integer.
//!
//! Values are concatenated byte for byte without JSON escaping. Callers must
//! sanitize content that may contain quotes or control characters.

/// Longest message kept, in bytes; longer messages are cut when set
pub const MAX_LOG_MESSAGE_LEN: usize = 32_768;

/// Internal timestamps are microseconds; events store milliseconds
pub const TIME_DIVISOR_MS: u64 = 1_000;

/// One structured log line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEvent {
    message: Option<String>,
    log_level: Option<String>,
    trace_id: Option<String>,
    span_id: Option<String>,
    entity_guid: Option<String>,
    entity_name: Option<String>,
    hostname: Option<String>,
    /// Milliseconds since epoch
    timestamp: u64,
    priority: i32,
}

impl LogEvent {
    /// Create an empty event
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message, truncated to [`MAX_LOG_MESSAGE_LEN`] bytes
    pub fn set_message(&mut self, message: &str) {
        self.message = Some(truncate_on_char_boundary(message, MAX_LOG_MESSAGE_LEN).to_string());
    }

    /// Set the log level (e.g. "INFO", "ERROR")
    pub fn set_log_level(&mut self, log_level: &str) {
        self.log_level = Some(log_level.to_string());
    }

    /// Set the timestamp from microseconds since epoch
    ///
    /// Stored as whole milliseconds; the remainder is truncated, not rounded.
    pub fn set_timestamp(&mut self, time_us: u64) {
        self.timestamp = time_us / TIME_DIVISOR_MS;
    }

    pub fn set_trace_id(&mut self, trace_id: &str) {
        self.trace_id = Some(trace_id.to_string());
    }

    pub fn set_span_id(&mut self, span_id: &str) {
        self.span_id = Some(span_id.to_string());
    }

    pub fn set_guid(&mut self, guid: &str) {
        self.entity_guid = Some(guid.to_string());
    }

    pub fn set_entity_name(&mut self, entity_name: &str) {
        self.entity_name = Some(entity_name.to_string());
    }

    pub fn set_hostname(&mut self, hostname: &str) {
        self.hostname = Some(hostname.to_string());
    }

    /// Set the sampling priority used when the event pool is full
    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    #[inline]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    #[inline]
    pub fn span_id(&self) -> Option<&str> {
        self.span_id.as_deref()
    }

    #[inline]
    pub fn guid(&self) -> Option<&str> {
        self.entity_guid.as_deref()
    }

    #[inline]
    pub fn entity_name(&self) -> Option<&str> {
        self.entity_name.as_deref()
    }

    #[inline]
    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// Timestamp in milliseconds since epoch
    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    // =========================================================================
    // JSON
    // =========================================================================

    /// Serialize as a single-element JSON array: `[{...}]`
    pub fn to_json(&self) -> String {
        let mut buf = String::with_capacity(128 + self.message.as_ref().map_or(0, String::len));
        self.write_json(&mut buf, false);
        buf
    }

    /// Append this event to `buf`
    ///
    /// With `partial` set only the object body is written, so several events
    /// can be joined into one array by the caller.
    pub fn write_json(&self, buf: &mut String, partial: bool) {
        if !partial {
            buf.push('[');
        }
        buf.push('{');

        push_field(buf, "message", self.message.as_deref(), true, true);
        push_field(buf, "level", self.log_level.as_deref(), false, true);
        push_field(buf, "trace.id", self.trace_id.as_deref(), false, false);
        push_field(buf, "span.id", self.span_id.as_deref(), false, false);
        push_field(buf, "entity.guid", self.entity_guid.as_deref(), false, false);
        push_field(buf, "entity.name", self.entity_name.as_deref(), false, false);
        push_field(buf, "hostname", self.hostname.as_deref(), false, false);

        buf.push_str(",\"timestamp\":");
        buf.push_str(&self.timestamp.to_string());

        buf.push('}');
        if !partial {
            buf.push(']');
        }
    }
}

/// Join events into one JSON array: `[{...},{...}]`
pub fn write_json_array(events: &[LogEvent], buf: &mut String) {
    buf.push('[');
    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        event.write_json(buf, true);
    }
    buf.push(']');
}

/// Write `"name":"value"`; returns false when an optional field was skipped
fn push_field(buf: &mut String, name: &str, value: Option<&str>, first: bool, required: bool) -> bool {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ if required => "null",
        _ => return false,
    };

    if !first {
        buf.push(',');
    }
    buf.push('"');
    buf.push_str(name);
    buf.push_str("\":\"");
    buf.push_str(value);
    buf.push('"');

    true
}

fn truncate_on_char_boundary(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }

    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
