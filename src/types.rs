//! Shared value types used by the router cores and the client session,
//! grounded in `wampproto.types`.

use serde_json::Value;
use std::collections::HashSet;

use crate::messages::Messages;

/// What the router remembers about a joined session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDetails {
    pub session_id: u64,
    pub realm: String,
    pub authid: String,
    pub authrole: String,
}

impl SessionDetails {
    pub fn new(session_id: u64, realm: impl Into<String>, authid: impl Into<String>, authrole: impl Into<String>) -> Self {
        Self {
            session_id,
            realm: realm.into(),
            authid: authid.into(),
            authrole: authrole.into(),
        }
    }
}

/// A single procedure registration: which session is the registrant.
///
/// This spec does not implement shared registrations (round-robin/random
/// invocation policies): at most one registrant per procedure, matching the
/// dealer's `procedure_already_exists` rejection on a second Register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: u64,
    pub procedure: String,
    pub session: u64,
}

/// A single topic subscription and its current subscriber set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: u64,
    pub topic: String,
    pub subscribers: HashSet<u64>,
}

/// A call in flight at the dealer: which caller/callee it correlates, and
/// whether it is a progressive call still accepting further fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInvocation {
    pub invocation_id: u64,
    pub caller_session: u64,
    pub caller_request_id: u64,
    pub callee_session: u64,
    pub receive_progress: bool,
}

/// Result of a `Message` paired with the session it must be delivered to.
/// The embedder looks this up and calls its own `send` for that session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageWithRecipient {
    pub message: Messages,
    pub recipient: u64,
}

impl MessageWithRecipient {
    pub fn new(message: impl Into<Messages>, recipient: u64) -> Self {
        Self {
            message: message.into(),
            recipient,
        }
    }
}

/// Result of a Publish: the broker hands back one `Event` to fan out to
/// every recipient, plus an optional `Published` acknowledgement for the
/// publisher. The caller (embedder) performs the actual fan-out send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub event: Option<Messages>,
    pub recipients: Vec<u64>,
    pub ack: Option<MessageWithRecipient>,
}

/// Options carried on Call/Invocation that drive progressive-call
/// coalescing. Absent keys default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressOptions {
    pub receive_progress: bool,
    pub progress: bool,
}

impl ProgressOptions {
    pub fn from_value(options: &Value) -> Self {
        let get = |key: &str| {
            options
                .as_object()
                .and_then(|m| m.get(key))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };
        Self {
            receive_progress: get("receive_progress"),
            progress: get("progress"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn progress_options_default_false() {
        let opts = ProgressOptions::from_value(&json!({}));
        assert!(!opts.receive_progress);
        assert!(!opts.progress);
    }

    #[test]
    fn progress_options_reads_flags() {
        let opts = ProgressOptions::from_value(&json!({"receive_progress": true, "progress": true}));
        assert!(opts.receive_progress);
        assert!(opts.progress);
    }
}
