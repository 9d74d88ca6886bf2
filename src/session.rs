//! Client-side correlation and legality bookkeeping: pairs outbound
//! requests with the inbound responses that settle them and enforces
//! ordering invariants (no Yield without a matching Invocation, no
//! duplicate Result, ...). Grounded in `wampproto.session`, expanded per
//! spec from its original call/register/invocation-only tracking to all
//! six request kinds plus confirmed registrations/subscriptions.

use std::collections::HashSet;

use crate::error::Error;
use crate::messages::{Messages, WampErrorEvent};

fn unknown_request_id(set_name: &'static str, request_id: u64) -> Error {
    Error::ProtocolState {
        state: "session",
        message: format!("received response for unknown {set_name} request_id {request_id}"),
    }
}

/// Client-side request/response correlation. One instance per joined
/// session; the embedder owns serialization and calls `send_message`
/// before writing bytes, `receive_message` after parsing them.
#[derive(Debug, Clone, Default)]
pub struct Session {
    call_requests: HashSet<u64>,
    register_requests: HashSet<u64>,
    unregister_requests: HashSet<u64>,
    subscribe_requests: HashSet<u64>,
    unsubscribe_requests: HashSet<u64>,
    publish_requests: HashSet<u64>,

    registrations: HashSet<u64>,
    subscriptions: HashSet<u64>,
    invocation_requests: HashSet<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the bookkeeping for an outbound message. Does not serialize;
    /// the embedder does that separately with a [`crate::serializers::Serializer`].
    pub fn send_message(&mut self, message: &Messages) -> Result<(), Error> {
        tracing::trace!(message = ?message.id(), "session sending message");
        match message {
            Messages::Call(m) => {
                self.call_requests.insert(m.request_id);
                Ok(())
            }
            Messages::Register(m) => {
                self.register_requests.insert(m.request_id);
                Ok(())
            }
            Messages::Unregister(m) => {
                self.unregister_requests.insert(m.request_id);
                Ok(())
            }
            Messages::Subscribe(m) => {
                self.subscribe_requests.insert(m.request_id);
                Ok(())
            }
            Messages::Unsubscribe(m) => {
                self.unsubscribe_requests.insert(m.request_id);
                Ok(())
            }
            Messages::Publish(m) => {
                if m.options.get("acknowledge").and_then(serde_json::Value::as_bool) == Some(true) {
                    self.publish_requests.insert(m.request_id);
                }
                Ok(())
            }
            Messages::Yield(m) => {
                if !self.invocation_requests.remove(&m.request_id) {
                    return Err(Error::ProtocolState {
                        state: "session",
                        message: format!("cannot yield for unknown invocation request {}", m.request_id),
                    });
                }
                Ok(())
            }
            Messages::Error(m) => {
                if m.event != WampErrorEvent::Invocation {
                    return Err(Error::ProtocolState {
                        state: "session",
                        message: "Error may only be sent in response to an Invocation".to_string(),
                    });
                }
                if !self.invocation_requests.remove(&m.request_id) {
                    return Err(Error::ProtocolState {
                        state: "session",
                        message: format!("cannot error for unknown invocation request {}", m.request_id),
                    });
                }
                Ok(())
            }
            Messages::Goodbye(_) => Ok(()),
            other => Err(Error::ProtocolState {
                state: "session",
                message: format!("unknown message type {:?} for send_message", other.id()),
            }),
        }
    }

    /// Validates an inbound message against outstanding bookkeeping and
    /// updates it, returning the message untouched for the embedder to act on.
    pub fn receive_message(&mut self, message: Messages) -> Result<Messages, Error> {
        tracing::trace!(message = ?message.id(), "session received message");
        match &message {
            Messages::Result(m) => {
                if !self.call_requests.remove(&m.request_id) {
                    let err = unknown_request_id("call", m.request_id);
                    tracing::warn!(%err, "session rejected message");
                    return Err(err);
                }
            }
            Messages::Registered(m) => {
                if !self.register_requests.remove(&m.request_id) {
                    return Err(unknown_request_id("register", m.request_id));
                }
                self.registrations.insert(m.registration);
            }
            Messages::Unregistered(m) => {
                if !self.unregister_requests.remove(&m.request_id) {
                    return Err(unknown_request_id("unregister", m.request_id));
                }
            }
            Messages::Subscribed(m) => {
                if !self.subscribe_requests.remove(&m.request_id) {
                    return Err(unknown_request_id("subscribe", m.request_id));
                }
                self.subscriptions.insert(m.subscription);
            }
            Messages::Unsubscribed(m) => {
                if !self.unsubscribe_requests.remove(&m.request_id) {
                    return Err(unknown_request_id("unsubscribe", m.request_id));
                }
            }
            Messages::Published(m) => {
                if !self.publish_requests.remove(&m.request_id) {
                    return Err(unknown_request_id("publish", m.request_id));
                }
            }
            Messages::Invocation(m) => {
                if !self.registrations.contains(&m.registration) {
                    return Err(Error::ProtocolState {
                        state: "session",
                        message: format!("received Invocation for unconfirmed registration {}", m.registration),
                    });
                }
                self.invocation_requests.insert(m.request_id);
            }
            Messages::Event(m) => {
                if !self.subscriptions.contains(&m.subscription) {
                    return Err(Error::ProtocolState {
                        state: "session",
                        message: format!("received Event for unconfirmed subscription {}", m.subscription),
                    });
                }
            }
            Messages::Error(m) => {
                let removed = match m.event {
                    WampErrorEvent::Call => self.call_requests.remove(&m.request_id),
                    WampErrorEvent::Register => self.register_requests.remove(&m.request_id),
                    WampErrorEvent::Unregister => self.unregister_requests.remove(&m.request_id),
                    WampErrorEvent::Subscribe => self.subscribe_requests.remove(&m.request_id),
                    WampErrorEvent::Unsubscribe => self.unsubscribe_requests.remove(&m.request_id),
                    WampErrorEvent::Publish => self.publish_requests.remove(&m.request_id),
                    WampErrorEvent::Cancel => self.call_requests.remove(&m.request_id),
                    WampErrorEvent::Invocation => self.invocation_requests.remove(&m.request_id),
                };
                if !removed {
                    return Err(unknown_request_id("matching", m.request_id));
                }
            }
            Messages::Goodbye(_) | Messages::Abort(_) => {}
            other => {
                return Err(Error::ProtocolState {
                    state: "session",
                    message: format!("unknown message type {:?} for receive_message", other.id()),
                })
            }
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{Call, Published, Publish, Registered, Subscribed, Subscribe, WampError};
    use serde_json::json;

    #[test]
    fn result_settles_a_call_request() {
        let mut session = Session::new();
        session.send_message(&Messages::Call(Call {
            request_id: 1,
            options: json!({}),
            procedure: "foo".to_string(),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
            payload: None,
            payload_serializer: None,
        })).unwrap();
        let result = Messages::Result(crate::messages::WampResult {
            request_id: 1,
            details: json!({}),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
            payload: None,
            payload_serializer: None,
        });
        assert!(session.receive_message(result).is_ok());
        assert!(session.call_requests.is_empty());
    }

    #[test]
    fn unsolicited_result_is_rejected() {
        let mut session = Session::new();
        let result = Messages::Result(crate::messages::WampResult {
            request_id: 99,
            details: json!({}),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
            payload: None,
            payload_serializer: None,
        });
        assert!(session.receive_message(result).is_err());
    }

    #[test]
    fn registered_tracks_confirmed_registration() {
        let mut session = Session::new();
        session.send_message(&Messages::Register(crate::messages::Register {
            request_id: 1,
            options: json!({}),
            procedure: "foo".to_string(),
        })).unwrap();
        session
            .receive_message(Messages::Registered(Registered {
                request_id: 1,
                registration: 55,
            }))
            .unwrap();
        assert!(session.registrations.contains(&55));
    }

    #[test]
    fn invocation_requires_confirmed_registration() {
        let mut session = Session::new();
        let invocation = Messages::Invocation(crate::messages::Invocation {
            request_id: 1,
            registration: 55,
            details: json!({}),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
            payload: None,
            payload_serializer: None,
        });
        assert!(session.receive_message(invocation).is_err());
    }

    #[test]
    fn yield_requires_a_pending_invocation() {
        let mut session = Session::new();
        let yield_msg = Messages::Yield(crate::messages::Yield {
            request_id: 1,
            options: json!({}),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
            payload: None,
            payload_serializer: None,
        });
        assert!(session.send_message(&yield_msg).is_err());
    }

    #[test]
    fn publish_without_acknowledge_is_not_tracked() {
        let mut session = Session::new();
        session.send_message(&Messages::Publish(Publish {
            request_id: 1,
            options: json!({}),
            topic: "foo".to_string(),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
        })).unwrap();
        assert!(session.publish_requests.is_empty());
        let published = Messages::Published(Published { request_id: 1, publication: 2 });
        assert!(session.receive_message(published).is_err());
    }

    #[test]
    fn error_dispatches_to_the_matching_set() {
        let mut session = Session::new();
        session.send_message(&Messages::Subscribe(Subscribe {
            request_id: 7,
            options: json!({}),
            topic: "foo".to_string(),
        })).unwrap();
        let error = Messages::Error(WampError {
            event: WampErrorEvent::Subscribe,
            request_id: 7,
            details: json!({}),
            error: "wamp.error.not_authorized".to_string(),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
            payload: None,
            payload_serializer: None,
        });
        assert!(session.receive_message(error).is_ok());
        assert!(session.subscribe_requests.is_empty());
    }
}
