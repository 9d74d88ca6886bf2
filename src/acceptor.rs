//! Router-side join handshake state machine: receives Hello, challenges or
//! welcomes, and verifies the Authenticate that follows. Grounded in
//! `wampproto.acceptor`, with three deliberate departures from it:
//!
//! - `final` is true for both Welcome *and* Abort, not Welcome alone.
//! - Every authentication failure is turned into an explicit Abort carrying
//!   `wamp.error.authentication_failed`, instead of letting the error
//!   propagate raw.
//! - A failed signature verification (cryptosign, wampcra) also produces
//!   that Abort rather than being silently ignored.

use serde_json::{json, Value};

use crate::auth::{
    generate_cryptosign_challenge, generate_wampcra_challenge, verify_cryptosign_signature,
    verify_wampcra_signature, AuthRequest, AuthResponse, ServerAuthenticator, SystemClock,
};
use crate::error::{uris, Error};
use crate::id::generate_session_id;
use crate::messages::{Abort, Authenticate, Challenge, Hello, Messages, Welcome};
use crate::roles::{roles_to_value, Roles};
use crate::serializers::Serializer;
use crate::types::SessionDetails;

/// An [`Acceptor`]'s progress through the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptorState {
    None,
    HelloReceived,
    ChallengeSent,
    WelcomeSent,
    Errored,
}

/// Router-side join handshake: `None -> HelloReceived -> {ChallengeSent ->} WelcomeSent`,
/// or terminal `Errored` after an Abort is sent.
pub struct Acceptor {
    authenticator: Option<Box<dyn ServerAuthenticator>>,
    roles: Value,
    state: AcceptorState,
    session_id: u64,

    auth_method: Option<String>,
    realm: Option<String>,
    hello_authid: Option<String>,
    hello_auth_extra: Option<Value>,
    response: Option<AuthResponse>,
    session_details: Option<SessionDetails>,

    public_key: Option<String>,
    challenge: Option<String>,
    secret: Option<String>,
}

fn auth_failed_abort(message: impl Into<String>) -> Messages {
    Messages::Abort(Abort {
        details: json!({ "message": message.into() }),
        reason: uris::AUTHENTICATION_FAILED.to_string(),
        args: Value::Null,
        kwargs: Value::Null,
    })
}

impl Acceptor {
    /// An acceptor that welcomes every Hello unconditionally as `anonymous`,
    /// matching the source's behavior when no authenticator is configured.
    pub fn open() -> Self {
        Self::new(None, None)
    }

    pub fn new(authenticator: Option<Box<dyn ServerAuthenticator>>, roles: Option<Value>) -> Self {
        Self {
            authenticator,
            roles: roles.unwrap_or_else(|| roles_to_value(&Roles::ROUTER)),
            state: AcceptorState::None,
            session_id: generate_session_id(),
            auth_method: None,
            realm: None,
            hello_authid: None,
            hello_auth_extra: None,
            response: None,
            session_details: None,
            public_key: None,
            challenge: None,
            secret: None,
        }
    }

    pub fn state(&self) -> AcceptorState {
        self.state
    }

    fn welcome_session(&mut self, realm: &str, authid: &str, authrole: &str) -> Messages {
        self.state = AcceptorState::WelcomeSent;
        self.session_details = Some(SessionDetails::new(self.session_id, realm, authid, authrole));
        tracing::debug!(session = self.session_id, %authid, %authrole, "acceptor welcomed session");
        Messages::Welcome(Welcome {
            session: self.session_id,
            details: json!({
                "roles": self.roles.clone(),
                "authid": authid,
                "authrole": authrole,
                "authmethod": self.auth_method.clone().unwrap_or_else(|| "anonymous".to_string()),
            }),
        })
    }

    fn abort(&mut self, message: impl Into<String>) -> Messages {
        self.state = AcceptorState::Errored;
        let message = message.into();
        tracing::warn!(%message, "acceptor aborting join");
        auth_failed_abort(message)
    }

    /// Processes one incoming message. The return value is always the
    /// message to send back to the peer: `Welcome`, `Challenge`, or (on an
    /// authentication failure) `Abort`. Protocol-sequencing violations are
    /// raised as errors instead, since there is no well-defined reply.
    pub fn receive_message(&mut self, msg: Messages) -> Result<Messages, Error> {
        tracing::trace!(state = ?self.state, message = ?msg.id(), "acceptor received message");
        if self.state == AcceptorState::WelcomeSent {
            return Err(Error::ProtocolState {
                state: "acceptor",
                message: "session was established, not expecting any new messages".to_string(),
            });
        }

        match msg {
            Messages::Hello(hello) => self.on_hello(hello),
            Messages::Authenticate(authenticate) => self.on_authenticate(authenticate),
            Messages::Abort(_) => {
                self.state = AcceptorState::Errored;
                Err(Error::ProtocolState {
                    state: "acceptor",
                    message: "peer aborted the join handshake".to_string(),
                })
            }
            other => Err(Error::ProtocolState {
                state: "acceptor",
                message: format!("received unexpected message {:?} while joining", other.id()),
            }),
        }
    }

    fn on_hello(&mut self, hello: Hello) -> Result<Messages, Error> {
        if self.state != AcceptorState::None {
            return Err(Error::ProtocolState {
                state: "acceptor",
                message: "received Hello when it was not expected".to_string(),
            });
        }
        self.state = AcceptorState::HelloReceived;
        self.realm = Some(hello.realm.clone());

        let Some(authenticator) = self.authenticator.as_ref() else {
            return Ok(self.welcome_session(&hello.realm, "anonymous", "anonymous"));
        };

        let authmethods = hello
            .details
            .get("authmethods")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let method = authmethods
            .first()
            .and_then(Value::as_str)
            .unwrap_or("anonymous")
            .to_string();
        let authid = hello
            .details
            .get("authid")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let auth_extra = hello.details.get("authextra").cloned().unwrap_or_else(|| json!({}));

        self.auth_method = Some(method.clone());
        self.hello_authid = Some(authid.clone());
        self.hello_auth_extra = Some(auth_extra.clone());

        match method.as_str() {
            "anonymous" => {
                let request = AuthRequest {
                    method: "anonymous",
                    realm: hello.realm.clone(),
                    authid,
                    auth_extra,
                    ticket: None,
                };
                match authenticator.authenticate(&request) {
                    Ok(response) => {
                        let (authid, authrole) = (response.authid().to_string(), response.authrole().to_string());
                        Ok(self.welcome_session(&hello.realm, &authid, &authrole))
                    }
                    Err(e) => Ok(self.abort(e.to_string())),
                }
            }
            "cryptosign" => {
                let Some(public_key) = auth_extra.get("pubkey").and_then(Value::as_str).map(str::to_string) else {
                    return Ok(self.abort("authextra must contain pubkey for cryptosign"));
                };
                let request = AuthRequest {
                    method: "cryptosign",
                    realm: hello.realm.clone(),
                    authid,
                    auth_extra,
                    ticket: None,
                };
                match authenticator.authenticate(&request) {
                    Ok(response) => {
                        self.response = Some(response);
                        self.public_key = Some(public_key);
                        let challenge = generate_cryptosign_challenge();
                        self.challenge = Some(challenge.clone());
                        self.state = AcceptorState::ChallengeSent;
                        Ok(Messages::Challenge(Challenge {
                            authmethod: method,
                            details: json!({ "challenge": challenge }),
                        }))
                    }
                    Err(e) => Ok(self.abort(e.to_string())),
                }
            }
            "wampcra" => {
                let request = AuthRequest {
                    method: "wampcra",
                    realm: hello.realm.clone(),
                    authid,
                    auth_extra,
                    ticket: None,
                };
                match authenticator.authenticate(&request) {
                    Ok(response @ AuthResponse::WampCra { .. }) => {
                        let AuthResponse::WampCra { authid, authrole, secret, salt } = &response else {
                            unreachable!()
                        };
                        let challenge_result =
                            generate_wampcra_challenge(self.session_id, authid, authrole, "dynamic", &SystemClock);
                        match challenge_result {
                            Ok(challenge) => {
                                let mut details = json!({ "challenge": challenge });
                                if let Some(salt) = salt {
                                    details["salt"] = json!(salt.salt);
                                    details["iterations"] = json!(salt.iterations);
                                    details["keylen"] = json!(salt.keylen);
                                }
                                self.secret = Some(secret.clone());
                                self.challenge = Some(challenge);
                                self.response = Some(response);
                                self.state = AcceptorState::ChallengeSent;
                                Ok(Messages::Challenge(Challenge {
                                    authmethod: method,
                                    details,
                                }))
                            }
                            Err(e) => Ok(self.abort(e.to_string())),
                        }
                    }
                    Ok(_) => Ok(self.abort("invalid response type for wampcra")),
                    Err(e) => Ok(self.abort(e.to_string())),
                }
            }
            "ticket" => {
                self.state = AcceptorState::ChallengeSent;
                Ok(Messages::Challenge(Challenge {
                    authmethod: method,
                    details: json!({}),
                }))
            }
            _ => Ok(self.abort(format!("unknown auth method '{method}'"))),
        }
    }

    fn on_authenticate(&mut self, authenticate: Authenticate) -> Result<Messages, Error> {
        if self.state != AcceptorState::ChallengeSent {
            return Err(Error::ProtocolState {
                state: "acceptor",
                message: "received Authenticate when it was not expected".to_string(),
            });
        }
        let realm = self.realm.clone().unwrap_or_default();
        let method = self.auth_method.clone().unwrap_or_default();

        match method.as_str() {
            "cryptosign" => {
                let public_key = self.public_key.clone().unwrap_or_default();
                match verify_cryptosign_signature(&authenticate.signature, &public_key) {
                    Ok(true) => {
                        let response = self.response.clone().expect("set when challenge was sent");
                        let (authid, authrole) = (response.authid().to_string(), response.authrole().to_string());
                        Ok(self.welcome_session(&realm, &authid, &authrole))
                    }
                    Ok(false) => Ok(self.abort("invalid cryptosign signature")),
                    Err(e) => Ok(self.abort(e.to_string())),
                }
            }
            "wampcra" => {
                let challenge = self.challenge.clone().unwrap_or_default();
                let secret = self.secret.clone().unwrap_or_default();
                match verify_wampcra_signature(&authenticate.signature, &challenge, secret.as_bytes()) {
                    Ok(true) => {
                        let response = self.response.clone().expect("set when challenge was sent");
                        let (authid, authrole) = (response.authid().to_string(), response.authrole().to_string());
                        Ok(self.welcome_session(&realm, &authid, &authrole))
                    }
                    Ok(false) => Ok(self.abort("invalid wampcra signature")),
                    Err(e) => Ok(self.abort(e.to_string())),
                }
            }
            "ticket" => {
                let Some(authenticator) = self.authenticator.as_ref() else {
                    return Ok(self.abort("no authenticator configured for ticket"));
                };
                let request = AuthRequest {
                    method: "ticket",
                    realm: realm.clone(),
                    authid: self.hello_authid.clone().unwrap_or_default(),
                    auth_extra: self.hello_auth_extra.clone().unwrap_or_else(|| json!({})),
                    ticket: Some(authenticate.signature.clone()),
                };
                match authenticator.authenticate(&request) {
                    Ok(response) => {
                        let (authid, authrole) = (response.authid().to_string(), response.authrole().to_string());
                        Ok(self.welcome_session(&realm, &authid, &authrole))
                    }
                    Err(e) => Ok(self.abort(e.to_string())),
                }
            }
            _ => Ok(self.abort(format!("unknown auth method '{method}'"))),
        }
    }

    /// Deserializes one wire message with `serializer`, returning the
    /// serialized reply and whether the handshake concluded (Welcome or
    /// Abort) — the `final` flag this spec mandates.
    pub fn receive(&mut self, serializer: &dyn Serializer, data: &[u8]) -> Result<(Vec<u8>, bool), Error> {
        let message = serializer.deserialize(data)?;
        let reply = self.receive_message(message)?;
        let is_final = matches!(reply, Messages::Welcome(_) | Messages::Abort(_));
        Ok((serializer.serialize(&reply)?, is_final))
    }

    /// The session details recorded on Welcome. Only valid once `WelcomeSent`.
    pub fn get_session_details(&self) -> Result<&SessionDetails, Error> {
        self.session_details.as_ref().ok_or_else(|| Error::ProtocolState {
            state: "acceptor",
            message: "session is not set up yet".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::WampCraSaltParams;

    struct StaticAuthenticator;
    impl ServerAuthenticator for StaticAuthenticator {
        fn authenticate(&self, request: &AuthRequest) -> Result<AuthResponse, Error> {
            match request.method {
                "anonymous" => Ok(AuthResponse::Anonymous {
                    authid: "anonymous".to_string(),
                    authrole: "anonymous".to_string(),
                }),
                "wampcra" => Ok(AuthResponse::WampCra {
                    authid: "alice".to_string(),
                    authrole: "user".to_string(),
                    secret: "secret123".to_string(),
                    salt: None,
                }),
                "ticket" => {
                    if request.ticket.as_deref() == Some("s3cr3t") {
                        Ok(AuthResponse::Ticket {
                            authid: "alice".to_string(),
                            authrole: "user".to_string(),
                        })
                    } else {
                        Err(Error::AuthenticationFailed("bad ticket".to_string()))
                    }
                }
                "cryptosign" => Ok(AuthResponse::Cryptosign {
                    authid: "alice".to_string(),
                    authrole: "user".to_string(),
                }),
                _ => Err(Error::AuthenticationFailed("unsupported".to_string())),
            }
        }
    }

    #[test]
    fn open_acceptor_welcomes_anonymously() {
        let mut acceptor = Acceptor::open();
        let hello = Hello {
            realm: "realm1".to_string(),
            details: json!({"roles": {}, "authmethods": ["anonymous"]}),
        };
        let reply = acceptor.receive_message(Messages::Hello(hello)).unwrap();
        assert!(matches!(reply, Messages::Welcome(_)));
        assert_eq!(acceptor.state(), AcceptorState::WelcomeSent);
        assert_eq!(acceptor.get_session_details().unwrap().authid, "anonymous");
    }

    #[test]
    fn wampcra_round_trip_succeeds() {
        let mut acceptor = Acceptor::new(Some(Box::new(StaticAuthenticator)), None);
        let hello = Hello {
            realm: "realm1".to_string(),
            details: json!({"roles": {}, "authid": "alice", "authmethods": ["wampcra"]}),
        };
        let reply = acceptor.receive_message(Messages::Hello(hello)).unwrap();
        let challenge_str = match &reply {
            Messages::Challenge(c) => c.details["challenge"].as_str().unwrap().to_string(),
            other => panic!("expected Challenge, got {other:?}"),
        };
        assert_eq!(acceptor.state(), AcceptorState::ChallengeSent);

        let signature = crate::auth::sign_wampcra_challenge(&challenge_str, b"secret123").unwrap();
        let authenticate = Authenticate {
            signature,
            details: json!({}),
        };
        let reply = acceptor.receive_message(Messages::Authenticate(authenticate)).unwrap();
        assert!(matches!(reply, Messages::Welcome(_)));
        assert_eq!(acceptor.state(), AcceptorState::WelcomeSent);
    }

    #[test]
    fn wampcra_bad_signature_aborts() {
        let mut acceptor = Acceptor::new(Some(Box::new(StaticAuthenticator)), None);
        let hello = Hello {
            realm: "realm1".to_string(),
            details: json!({"roles": {}, "authid": "alice", "authmethods": ["wampcra"]}),
        };
        acceptor.receive_message(Messages::Hello(hello)).unwrap();

        let authenticate = Authenticate {
            signature: "bm90dGhlcmlnaHRzaWduYXR1cmU=".to_string(),
            details: json!({}),
        };
        let reply = acceptor.receive_message(Messages::Authenticate(authenticate)).unwrap();
        match reply {
            Messages::Abort(abort) => assert_eq!(abort.reason, uris::AUTHENTICATION_FAILED),
            other => panic!("expected Abort, got {other:?}"),
        }
        assert_eq!(acceptor.state(), AcceptorState::Errored);
    }

    #[test]
    fn ticket_with_wrong_secret_aborts() {
        let mut acceptor = Acceptor::new(Some(Box::new(StaticAuthenticator)), None);
        let hello = Hello {
            realm: "realm1".to_string(),
            details: json!({"roles": {}, "authid": "alice", "authmethods": ["ticket"]}),
        };
        acceptor.receive_message(Messages::Hello(hello)).unwrap();

        let authenticate = Authenticate {
            signature: "wrong".to_string(),
            details: json!({}),
        };
        let reply = acceptor.receive_message(Messages::Authenticate(authenticate)).unwrap();
        match reply {
            Messages::Abort(abort) => assert_eq!(abort.reason, uris::AUTHENTICATION_FAILED),
            other => panic!("expected Abort, got {other:?}"),
        }
    }

    #[test]
    fn unknown_auth_method_aborts() {
        let mut acceptor = Acceptor::new(Some(Box::new(StaticAuthenticator)), None);
        let hello = Hello {
            realm: "realm1".to_string(),
            details: json!({"roles": {}, "authmethods": ["bogus"]}),
        };
        let reply = acceptor.receive_message(Messages::Hello(hello)).unwrap();
        match reply {
            Messages::Abort(abort) => assert_eq!(abort.reason, uris::AUTHENTICATION_FAILED),
            other => panic!("expected Abort, got {other:?}"),
        }
    }

    #[test]
    fn salted_wampcra_challenge_carries_salt_params() {
        struct SaltedAuthenticator;
        impl ServerAuthenticator for SaltedAuthenticator {
            fn authenticate(&self, _request: &AuthRequest) -> Result<AuthResponse, Error> {
                Ok(AuthResponse::WampCra {
                    authid: "alice".to_string(),
                    authrole: "user".to_string(),
                    secret: "secret123".to_string(),
                    salt: Some(WampCraSaltParams {
                        salt: "saltsalt".to_string(),
                        iterations: 1000,
                        keylen: 32,
                    }),
                })
            }
        }
        let mut acceptor = Acceptor::new(Some(Box::new(SaltedAuthenticator)), None);
        let hello = Hello {
            realm: "realm1".to_string(),
            details: json!({"roles": {}, "authid": "alice", "authmethods": ["wampcra"]}),
        };
        let reply = acceptor.receive_message(Messages::Hello(hello)).unwrap();
        match reply {
            Messages::Challenge(c) => {
                assert_eq!(c.details["salt"], "saltsalt");
                assert_eq!(c.details["iterations"], 1000);
            }
            other => panic!("expected Challenge, got {other:?}"),
        }
    }
}
