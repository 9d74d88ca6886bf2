//! RPC routing core: tracks registrations and in-flight invocations across
//! sessions and translates Call/Yield/Error traffic between caller and
//! callee. Grounded in `wampproto.dealer`, expanded per spec with a
//! dealer-scoped invocation id (distinct from the caller's request id), a
//! `call_to_invocation_id` coalescing map for progressive calls, rejection
//! of duplicate registrations, and Invocation-Error-to-Call-Error
//! translation — none of which the source implements.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::error::{uris, Error};
use crate::id::SessionScopeIdGenerator;
use crate::messages::{
    Call, Invocation, Messages, Register, Registered, Unregister, Unregistered, WampError,
    WampErrorEvent, WampResult, Yield,
};
use crate::types::{MessageWithRecipient, PendingInvocation, ProgressOptions, Registration, SessionDetails};

/// Server-side RPC routing state for one realm.
#[derive(Debug, Default)]
pub struct Dealer {
    registrations_by_procedure: HashMap<String, Registration>,
    registrations_by_session: HashMap<u64, HashMap<u64, Registration>>,
    pending_calls: HashMap<u64, PendingInvocation>,
    call_to_invocation_id: HashMap<(u64, u64), u64>,
    sessions: HashMap<u64, SessionDetails>,
    ids: SessionScopeIdGenerator,
}

impl Dealer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_session(&mut self, details: SessionDetails) -> Result<(), Error> {
        if self.sessions.contains_key(&details.session_id) {
            return Err(Error::ProtocolState {
                state: "dealer",
                message: format!("session {} already exists", details.session_id),
            });
        }
        self.sessions.insert(details.session_id, details);
        Ok(())
    }

    /// Removes a session and cascades: strips it from every registration's
    /// registrants, dropping registrations (and their procedure index
    /// entries) left with no registrant.
    pub fn remove_session(&mut self, session_id: u64) {
        tracing::debug!(session_id, "dealer removing session");
        self.sessions.remove(&session_id);
        if let Some(owned) = self.registrations_by_session.remove(&session_id) {
            for (_, registration) in owned {
                self.registrations_by_procedure.remove(&registration.procedure);
            }
        }
        self.pending_calls.retain(|_, pending| pending.caller_session != session_id && pending.callee_session != session_id);
        self.call_to_invocation_id.retain(|(caller_session, _), _| *caller_session != session_id);
    }

    fn require_session(&self, session_id: u64) -> Result<(), Error> {
        if self.sessions.contains_key(&session_id) {
            Ok(())
        } else {
            Err(Error::ProtocolState {
                state: "dealer",
                message: format!("session {session_id} does not exist"),
            })
        }
    }

    pub fn receive_register(&mut self, session_id: u64, register: Register) -> Result<MessageWithRecipient, Error> {
        self.require_session(session_id)?;
        if self.registrations_by_procedure.contains_key(&register.procedure) {
            tracing::warn!(procedure = %register.procedure, session_id, "registration rejected: procedure already exists");
            return Ok(MessageWithRecipient::new(
                error_for(WampErrorEvent::Register, register.request_id, uris::PROCEDURE_ALREADY_EXISTS),
                session_id,
            ));
        }
        let registration_id = self.ids.next();
        let registration = Registration {
            id: registration_id,
            procedure: register.procedure.clone(),
            session: session_id,
        };
        self.registrations_by_procedure.insert(register.procedure, registration.clone());
        self.registrations_by_session
            .entry(session_id)
            .or_default()
            .insert(registration_id, registration);
        tracing::debug!(registration_id, session_id, "registered procedure");

        Ok(MessageWithRecipient::new(
            Registered {
                request_id: register.request_id,
                registration: registration_id,
            },
            session_id,
        ))
    }

    pub fn receive_unregister(&mut self, session_id: u64, unregister: Unregister) -> Result<MessageWithRecipient, Error> {
        self.require_session(session_id)?;
        let owned = self.registrations_by_session.get_mut(&session_id);
        let registration = owned.and_then(|m| m.remove(&unregister.registration));
        let Some(registration) = registration else {
            return Err(Error::ProtocolState {
                state: "dealer",
                message: format!("registration {} does not belong to session {session_id}", unregister.registration),
            });
        };
        self.registrations_by_procedure.remove(&registration.procedure);
        Ok(MessageWithRecipient::new(
            Unregistered { request_id: unregister.request_id },
            session_id,
        ))
    }

    /// Forwards a Call as an Invocation to the procedure's sole registrant.
    /// A progressive fragment (`options.progress=true`) for a call that
    /// already has an invocation reuses that invocation id instead of
    /// allocating a new one.
    pub fn receive_call(&mut self, session_id: u64, call: Call) -> Result<MessageWithRecipient, Error> {
        self.require_session(session_id)?;
        let Some(registration) = self.registrations_by_procedure.get(&call.procedure).cloned() else {
            tracing::warn!(procedure = %call.procedure, session_id, "call to unknown procedure");
            return Ok(MessageWithRecipient::new(
                error_for(WampErrorEvent::Call, call.request_id, uris::NO_SUCH_PROCEDURE),
                session_id,
            ));
        };

        let call_options = ProgressOptions::from_value(&call.options);
        let correlation_key = (session_id, call.request_id);

        let invocation_id = if call_options.progress {
            match self.call_to_invocation_id.get(&correlation_key) {
                Some(id) => *id,
                None => {
                    let id = self.ids.next();
                    self.call_to_invocation_id.insert(correlation_key, id);
                    id
                }
            }
        } else {
            self.ids.next()
        };

        self.pending_calls.insert(
            invocation_id,
            PendingInvocation {
                invocation_id,
                caller_session: session_id,
                caller_request_id: call.request_id,
                callee_session: registration.session,
                receive_progress: call_options.receive_progress,
            },
        );

        let mut details = json!({});
        if call_options.receive_progress {
            details["receive_progress"] = json!(true);
        }
        if call_options.progress {
            details["progress"] = json!(true);
        }

        Ok(MessageWithRecipient::new(
            Invocation {
                request_id: invocation_id,
                registration: registration.id,
                details,
                args: call.args,
                kwargs: call.kwargs,
                payload: call.payload,
                payload_serializer: call.payload_serializer,
            },
            registration.session,
        ))
    }

    /// Forwards a callee's Yield as a Result to the original caller. A
    /// progressive Yield (itself `progress=true`, against a call that
    /// asked for `receive_progress=true`) keeps the pending entry open for
    /// further fragments; any other Yield closes it.
    pub fn receive_yield(&mut self, session_id: u64, yield_msg: Yield) -> Result<MessageWithRecipient, Error> {
        let Some(pending) = self.pending_calls.get(&yield_msg.request_id) else {
            return Err(Error::ProtocolState {
                state: "dealer",
                message: format!("yield for unknown invocation {}", yield_msg.request_id),
            });
        };
        if pending.callee_session != session_id {
            return Err(Error::ProtocolState {
                state: "dealer",
                message: "yield from a session that is not the registered callee".to_string(),
            });
        }
        let yield_progress = ProgressOptions::from_value(&yield_msg.options).progress;
        let is_progressive = yield_progress && pending.receive_progress;

        let caller_session = pending.caller_session;
        let caller_request_id = pending.caller_request_id;

        let mut details = json!({});
        if is_progressive {
            details["progress"] = json!(true);
        } else {
            self.pending_calls.remove(&yield_msg.request_id);
            self.call_to_invocation_id.retain(|_, id| *id != yield_msg.request_id);
        }

        Ok(MessageWithRecipient::new(
            WampResult {
                request_id: caller_request_id,
                details,
                args: yield_msg.args,
                kwargs: yield_msg.kwargs,
                payload: yield_msg.payload,
                payload_serializer: yield_msg.payload_serializer,
            },
            caller_session,
        ))
    }

    /// Translates a callee's Error for an Invocation into a Call-typed
    /// Error delivered to the original caller.
    pub fn receive_invocation_error(&mut self, session_id: u64, error: WampError) -> Result<MessageWithRecipient, Error> {
        if error.event != WampErrorEvent::Invocation {
            return Err(Error::ProtocolState {
                state: "dealer",
                message: "dealer only translates errors for message_type=Invocation".to_string(),
            });
        }
        let Some(pending) = self.pending_calls.remove(&error.request_id) else {
            return Err(Error::ProtocolState {
                state: "dealer",
                message: format!("error for unknown invocation {}", error.request_id),
            });
        };
        if pending.callee_session != session_id {
            return Err(Error::ProtocolState {
                state: "dealer",
                message: "error from a session that is not the registered callee".to_string(),
            });
        }
        self.call_to_invocation_id.retain(|_, id| *id != pending.invocation_id);

        Ok(MessageWithRecipient::new(
            WampError {
                event: WampErrorEvent::Call,
                request_id: pending.caller_request_id,
                details: error.details,
                error: error.error,
                args: error.args,
                kwargs: error.kwargs,
                payload: error.payload,
                payload_serializer: error.payload_serializer,
            },
            pending.caller_session,
        ))
    }

    /// Dispatches one inbound message to the matching typed handler; any
    /// other message kind is not supported by the dealer role.
    pub fn receive_message(&mut self, session_id: u64, message: Messages) -> Result<MessageWithRecipient, Error> {
        match message {
            Messages::Register(m) => self.receive_register(session_id, m),
            Messages::Unregister(m) => self.receive_unregister(session_id, m),
            Messages::Call(m) => self.receive_call(session_id, m),
            Messages::Yield(m) => self.receive_yield(session_id, m),
            Messages::Error(m) => self.receive_invocation_error(session_id, m),
            other => Err(Error::ProtocolState {
                state: "dealer",
                message: format!("message type {:?} not supported", other.id()),
            }),
        }
    }
}

fn error_for(event: WampErrorEvent, request_id: u64, uri: &str) -> WampError {
    WampError {
        event,
        request_id,
        details: json!({}),
        error: uri.to_string(),
        args: Value::Null,
        kwargs: Value::Null,
        payload: None,
        payload_serializer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Messages;

    fn session(id: u64) -> SessionDetails {
        SessionDetails::new(id, "realm1", "user", "user")
    }

    fn call(request_id: u64, procedure: &str, options: Value) -> Call {
        Call {
            request_id,
            options,
            procedure: procedure.to_string(),
            args: Value::Null,
            kwargs: Value::Null,
            payload: None,
            payload_serializer: None,
        }
    }

    #[test]
    fn register_then_call_forwards_an_invocation() {
        let mut dealer = Dealer::new();
        dealer.add_session(session(1)).unwrap();
        dealer.add_session(session(2)).unwrap();

        let registered = dealer
            .receive_register(1, Register { request_id: 10, options: json!({}), procedure: "echo".to_string() })
            .unwrap();
        assert_eq!(registered.recipient, 1);

        let invocation = dealer.receive_call(2, call(20, "echo", json!({}))).unwrap();
        assert_eq!(invocation.recipient, 1);
        assert!(matches!(invocation.message, Messages::Invocation(_)));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut dealer = Dealer::new();
        dealer.add_session(session(1)).unwrap();
        dealer.receive_register(1, Register { request_id: 1, options: json!({}), procedure: "echo".to_string() }).unwrap();
        let second = dealer
            .receive_register(1, Register { request_id: 2, options: json!({}), procedure: "echo".to_string() })
            .unwrap();
        match second.message {
            Messages::Error(e) => assert_eq!(e.error, uris::PROCEDURE_ALREADY_EXISTS),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn call_to_unknown_procedure_errors() {
        let mut dealer = Dealer::new();
        dealer.add_session(session(1)).unwrap();
        let reply = dealer.receive_call(1, call(1, "missing", json!({}))).unwrap();
        match reply.message {
            Messages::Error(e) => assert_eq!(e.error, uris::NO_SUCH_PROCEDURE),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn yield_closes_a_non_progressive_call() {
        let mut dealer = Dealer::new();
        dealer.add_session(session(1)).unwrap();
        dealer.add_session(session(2)).unwrap();
        dealer.receive_register(1, Register { request_id: 1, options: json!({}), procedure: "echo".to_string() }).unwrap();
        let invocation = dealer.receive_call(2, call(5, "echo", json!({}))).unwrap();
        let invocation_id = match invocation.message {
            Messages::Invocation(ref i) => i.request_id,
            _ => unreachable!(),
        };
        let result = dealer
            .receive_yield(1, Yield { request_id: invocation_id, options: json!({}), args: Value::Null, kwargs: Value::Null, payload: None, payload_serializer: None })
            .unwrap();
        assert_eq!(result.recipient, 2);
        assert!(matches!(result.message, Messages::Result(_)));
        assert!(dealer.pending_calls.is_empty());
    }

    #[test]
    fn progressive_call_reuses_invocation_id_and_stays_open() {
        let mut dealer = Dealer::new();
        dealer.add_session(session(1)).unwrap();
        dealer.add_session(session(2)).unwrap();
        dealer.receive_register(1, Register { request_id: 1, options: json!({}), procedure: "echo".to_string() }).unwrap();

        let first = dealer.receive_call(2, call(5, "echo", json!({"progress": true}))).unwrap();
        let second = dealer.receive_call(2, call(5, "echo", json!({"progress": true}))).unwrap();
        let (Messages::Invocation(i1), Messages::Invocation(i2)) = (&first.message, &second.message) else {
            panic!("expected invocations");
        };
        assert_eq!(i1.request_id, i2.request_id);

        let progressive_yield = dealer
            .receive_yield(1, Yield { request_id: i1.request_id, options: json!({"progress": true}), args: Value::Null, kwargs: Value::Null, payload: None, payload_serializer: None })
            .unwrap();
        assert!(matches!(progressive_yield.message, Messages::Result(_)));
        assert!(dealer.pending_calls.contains_key(&i1.request_id));
    }

    #[test]
    fn receive_message_rejects_unsupported_kinds() {
        let mut dealer = Dealer::new();
        dealer.add_session(session(1)).unwrap();
        let result = dealer.receive_message(
            1,
            Messages::from(crate::messages::Goodbye {
                details: json!({}),
                reason: "wamp.close.normal".to_string(),
            }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn receive_message_dispatches_register() {
        let mut dealer = Dealer::new();
        dealer.add_session(session(1)).unwrap();
        let result = dealer
            .receive_message(1, Messages::from(Register { request_id: 1, options: json!({}), procedure: "echo".to_string() }))
            .unwrap();
        assert!(matches!(result.message, Messages::Registered(_)));
    }

    #[test]
    fn remove_session_cascades() {
        let mut dealer = Dealer::new();
        dealer.add_session(session(1)).unwrap();
        dealer.receive_register(1, Register { request_id: 1, options: json!({}), procedure: "echo".to_string() }).unwrap();
        dealer.remove_session(1);
        assert!(dealer.registrations_by_procedure.is_empty());
        assert!(dealer.registrations_by_session.is_empty());
    }
}
