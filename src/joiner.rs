//! Client-side join handshake state machine: sends Hello, answers
//! Challenges through the configured authenticator, and lands in `Joined`
//! once Welcome arrives. Grounded in `wampproto.joiner`.

use serde_json::{json, Value};

use crate::auth::{AnonymousAuthenticator, ClientAuthenticator};
use crate::error::{ApplicationError, Error};
use crate::messages::{Abort, Authenticate, Challenge, Hello, Messages, Welcome};
use crate::roles::{roles_to_value, Roles};
use crate::serializers::Serializer;
use crate::types::SessionDetails;

/// A [`Joiner`]'s progress through the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinerState {
    None,
    HelloSent,
    AuthenticateSent,
    Joined,
    Aborted,
}

/// Client-side join handshake: `None -> HelloSent -> {AuthenticateSent ->} Joined`,
/// or terminal `Aborted`.
pub struct Joiner {
    realm: String,
    authenticator: Box<dyn ClientAuthenticator>,
    state: JoinerState,
    session_details: Option<SessionDetails>,
}

impl Joiner {
    pub fn new(realm: impl Into<String>, authenticator: Box<dyn ClientAuthenticator>) -> Self {
        Self {
            realm: realm.into(),
            authenticator,
            state: JoinerState::None,
            session_details: None,
        }
    }

    /// A `Joiner` configured for anonymous join, matching the source's
    /// default authenticator when none is supplied.
    pub fn anonymous(realm: impl Into<String>) -> Self {
        Self::new(realm, Box::new(AnonymousAuthenticator::default()))
    }

    /// Builds the Hello, advertising `roles` (or the default four client
    /// roles with empty feature sets) and the authenticator's
    /// method/authid/authextra; transitions to `HelloSent`.
    pub fn send_hello(&mut self, roles: Option<Value>) -> Hello {
        let roles = roles.unwrap_or_else(|| roles_to_value(&Roles::CLIENT));
        let details = json!({
            "roles": roles,
            "authid": self.authenticator.authid(),
            "authmethods": [self.authenticator.auth_method()],
            "authextra": self.authenticator.auth_extra(),
        });
        self.state = JoinerState::HelloSent;
        Hello {
            realm: self.realm.clone(),
            details,
        }
    }

    /// Processes one incoming message. Returns an Authenticate to send
    /// back when a Challenge demanded one; `None` for Welcome.
    pub fn receive_message(&mut self, message: Messages) -> Result<Option<Authenticate>, Error> {
        tracing::trace!(state = ?self.state, message = ?message.id(), "joiner received message");
        let result = match message {
            Messages::Welcome(welcome) => self.on_welcome(welcome),
            Messages::Challenge(challenge) => self.on_challenge(challenge).map(Some),
            Messages::Abort(abort) => self.on_abort(abort),
            other => Err(Error::ProtocolState {
                state: "joiner",
                message: format!("received unexpected message {:?} while joining", other.id()),
            }),
        };
        if let Err(ref err) = result {
            tracing::warn!(state = ?self.state, %err, "joiner rejected message");
        }
        result
    }

    fn on_welcome(&mut self, welcome: Welcome) -> Result<Option<Authenticate>, Error> {
        if !matches!(self.state, JoinerState::HelloSent | JoinerState::AuthenticateSent) {
            return Err(Error::ProtocolState {
                state: "joiner",
                message: "received Welcome when it was not expected".to_string(),
            });
        }
        let authid = welcome
            .details
            .get("authid")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let authrole = welcome
            .details
            .get("authrole")
            .and_then(Value::as_str)
            .unwrap_or_default();
        self.session_details = Some(SessionDetails::new(
            welcome.session,
            self.realm.clone(),
            authid,
            authrole,
        ));
        self.state = JoinerState::Joined;
        tracing::debug!(session = welcome.session, "joiner joined");
        Ok(None)
    }

    fn on_challenge(&mut self, challenge: Challenge) -> Result<Authenticate, Error> {
        if self.state != JoinerState::HelloSent {
            return Err(Error::ProtocolState {
                state: "joiner",
                message: "received Challenge when it was not expected".to_string(),
            });
        }
        let authenticate = self.authenticator.authenticate(&challenge)?;
        self.state = JoinerState::AuthenticateSent;
        Ok(authenticate)
    }

    fn on_abort(&mut self, abort: Abort) -> Result<Option<Authenticate>, Error> {
        self.state = JoinerState::Aborted;
        Err(Error::Application(ApplicationError {
            reason: abort.reason,
            args: abort.args,
            kwargs: abort.kwargs,
        }))
    }

    /// Deserializes one wire message with `serializer` and returns the
    /// serialized Authenticate to send back, if any.
    pub fn receive(
        &mut self,
        serializer: &dyn Serializer,
        data: &[u8],
    ) -> Result<Option<Vec<u8>>, Error> {
        let message = serializer.deserialize(data)?;
        match self.receive_message(message)? {
            Some(authenticate) => Ok(Some(serializer.serialize(&Messages::from(authenticate))?)),
            None => Ok(None),
        }
    }

    pub fn state(&self) -> JoinerState {
        self.state
    }

    /// The session details recorded on Welcome. Only valid once `Joined`.
    pub fn get_session_details(&self) -> Result<&SessionDetails, Error> {
        self.session_details.as_ref().ok_or_else(|| Error::ProtocolState {
            state: "joiner",
            message: "session is not set up yet".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_hello_has_expected_shape() {
        let mut joiner = Joiner::anonymous("realm1");
        let hello = joiner.send_hello(None);
        assert_eq!(hello.realm, "realm1");
        assert_eq!(hello.details["authid"], "anonymous");
        assert_eq!(hello.details["authmethods"], json!(["anonymous"]));
        assert_eq!(joiner.state(), JoinerState::HelloSent);
    }

    #[test]
    fn welcome_after_hello_joins() {
        let mut joiner = Joiner::anonymous("realm1");
        joiner.send_hello(None);
        let welcome = Welcome {
            session: 42,
            details: json!({"authid": "anonymous", "authrole": "anonymous"}),
        };
        let reply = joiner.receive_message(Messages::Welcome(welcome)).unwrap();
        assert!(reply.is_none());
        assert_eq!(joiner.state(), JoinerState::Joined);
        assert_eq!(joiner.get_session_details().unwrap().session_id, 42);
    }

    #[test]
    fn anonymous_rejects_a_challenge() {
        let mut joiner = Joiner::anonymous("realm1");
        joiner.send_hello(None);
        let challenge = Challenge {
            authmethod: "anonymous".to_string(),
            details: json!({}),
        };
        assert!(joiner.receive_message(Messages::Challenge(challenge)).is_err());
    }

    #[test]
    fn abort_raises_application_error() {
        let mut joiner = Joiner::anonymous("realm1");
        joiner.send_hello(None);
        let abort = Abort {
            details: json!({}),
            reason: "wamp.error.authentication_failed".to_string(),
            args: Value::Null,
            kwargs: Value::Null,
        };
        let err = joiner.receive_message(Messages::Abort(abort)).unwrap_err();
        assert!(matches!(err, Error::Application(_)));
        assert_eq!(joiner.state(), JoinerState::Aborted);
    }

    #[test]
    fn welcome_before_hello_is_a_protocol_error() {
        let mut joiner = Joiner::anonymous("realm1");
        let welcome = Welcome { session: 1, details: json!({}) };
        assert!(joiner.receive_message(Messages::Welcome(welcome)).is_err());
    }
}
