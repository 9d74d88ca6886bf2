//! Ticket client authenticator: answers a Challenge with a pre-shared
//! ticket string as the signature. Grounded in `wampproto.auth.ticket`.

use serde_json::Value;

use super::ClientAuthenticator;
use crate::error::Error;
use crate::messages::{Authenticate, Challenge};

/// Declares method `ticket`. Real verification happens server-side when
/// the Authenticate carrying this ticket arrives; the client's job is only
/// to echo it back.
#[derive(Debug, Clone)]
pub struct TicketAuthenticator {
    authid: String,
    ticket: String,
    auth_extra: Value,
}

impl TicketAuthenticator {
    pub fn new(authid: impl Into<String>, ticket: impl Into<String>) -> Self {
        Self {
            authid: authid.into(),
            ticket: ticket.into(),
            auth_extra: serde_json::json!({}),
        }
    }
}

impl ClientAuthenticator for TicketAuthenticator {
    fn auth_method(&self) -> &'static str {
        "ticket"
    }

    fn authid(&self) -> &str {
        &self.authid
    }

    fn auth_extra(&self) -> Value {
        self.auth_extra.clone()
    }

    fn authenticate(&self, _challenge: &Challenge) -> Result<Authenticate, Error> {
        Ok(Authenticate {
            signature: self.ticket.clone(),
            details: serde_json::json!({}),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_with_the_shared_ticket() {
        let authenticator = TicketAuthenticator::new("alice", "s3cr3t");
        let challenge = Challenge {
            authmethod: "ticket".to_string(),
            details: serde_json::json!({}),
        };
        let authenticate = authenticator.authenticate(&challenge).unwrap();
        assert_eq!(authenticate.signature, "s3cr3t");
    }
}
