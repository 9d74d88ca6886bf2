//! Anonymous client authenticator: advertises `anonymous` and never
//! expects a challenge. Grounded in `wampproto.auth.anonymous`.

use serde_json::Value;

use super::ClientAuthenticator;
use crate::error::Error;
use crate::messages::{Authenticate, Challenge};

/// Declares method `anonymous`. Anonymous join never challenges, so
/// [`authenticate`](ClientAuthenticator::authenticate) always fails — a
/// Challenge arriving after an anonymous Hello is a protocol error, not an
/// authentication failure.
#[derive(Debug, Clone)]
pub struct AnonymousAuthenticator {
    authid: String,
    auth_extra: Value,
}

impl AnonymousAuthenticator {
    pub fn new(authid: impl Into<String>) -> Self {
        Self {
            authid: authid.into(),
            auth_extra: serde_json::json!({}),
        }
    }
}

impl Default for AnonymousAuthenticator {
    fn default() -> Self {
        Self::new("anonymous")
    }
}

impl ClientAuthenticator for AnonymousAuthenticator {
    fn auth_method(&self) -> &'static str {
        "anonymous"
    }

    fn authid(&self) -> &str {
        &self.authid
    }

    fn auth_extra(&self) -> Value {
        self.auth_extra.clone()
    }

    fn authenticate(&self, _challenge: &Challenge) -> Result<Authenticate, Error> {
        Err(Error::ProtocolState {
            state: "anonymous",
            message: "anonymous authentication does not expect a challenge".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_any_challenge() {
        let authenticator = AnonymousAuthenticator::default();
        let challenge = Challenge {
            authmethod: "anonymous".to_string(),
            details: serde_json::json!({}),
        };
        assert!(authenticator.authenticate(&challenge).is_err());
    }
}
