//! WAMP-CRA: a challenge/response method using HMAC-SHA256 over a JSON
//! challenge blob, with an optional PBKDF2-HMAC-SHA256 key-derivation step
//! for salted secrets. Grounded in `wampproto.auth.wampcra`.
//!
//! Signatures are base64-encoded (not hex, as the source's
//! `binascii.hexlify` would suggest) — the joiner and acceptor only need
//! to agree with each other, and base64 is what this port standardizes on
//! for every non-hex-mandated signature in the crate.

use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::Sha256;

use super::ClientAuthenticator;
use crate::error::Error;
use crate::messages::{Authenticate, Challenge};

type HmacSha256 = Hmac<Sha256>;

/// Abstracts "now" behind a trait so WAMP-CRA challenge generation (and
/// anything that tests it) doesn't depend on wall-clock time.
pub trait Clock {
    /// UTC ISO-8601 timestamp to millisecond precision with a trailing `Z`.
    fn now_iso8601_millis(&self) -> String;
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso8601_millis(&self) -> String {
        chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WampCraChallengeBlob {
    nonce: String,
    authprovider: String,
    authid: String,
    authrole: String,
    authmethod: String,
    session: u64,
    timestamp: String,
}

/// Builds the JSON-encoded WAMP-CRA challenge string carried in
/// `Challenge.details.challenge`.
pub fn generate_wampcra_challenge(
    session_id: u64,
    authid: &str,
    authrole: &str,
    provider: &str,
    clock: &dyn Clock,
) -> Result<String, Error> {
    let blob = WampCraChallengeBlob {
        nonce: hex::encode(rand::random::<[u8; 16]>()),
        authprovider: provider.to_string(),
        authid: authid.to_string(),
        authrole: authrole.to_string(),
        authmethod: "wampcra".to_string(),
        session: session_id,
        timestamp: clock.now_iso8601_millis(),
    };
    Ok(serde_json::to_string(&blob)?)
}

fn hmac_sha256_raw(key: &[u8], challenge: &str) -> Result<Vec<u8>, Error> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| Error::AuthenticationFailed(format!("invalid wampcra key: {e}")))?;
    mac.update(challenge.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Signs a WAMP-CRA challenge string with HMAC-SHA256, base64-encoded.
pub fn sign_wampcra_challenge(challenge: &str, key: &[u8]) -> Result<String, Error> {
    let digest = hmac_sha256_raw(key, challenge)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(digest))
}

/// Verifies a WAMP-CRA signature against the expected HMAC-SHA256 digest
/// in constant time.
pub fn verify_wampcra_signature(signature: &str, challenge: &str, key: &[u8]) -> Result<bool, Error> {
    let expected = hmac_sha256_raw(key, challenge)?;
    let given = match base64::engine::general_purpose::STANDARD.decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return Ok(false),
    };
    Ok(constant_time_eq(&given, &expected))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Derives a PBKDF2-HMAC-SHA256 signing key from a plaintext secret and a
/// salt, for the optional salted-secret mode of WAMP-CRA.
pub fn derive_salted_key(
    secret: &str,
    salt: &str,
    iterations: u32,
    keylen: usize,
) -> Result<Vec<u8>, Error> {
    if iterations == 0 || keylen == 0 {
        return Err(Error::AuthenticationFailed(
            "wampcra salted key derivation requires iterations > 0 and keylen > 0".to_string(),
        ));
    }
    let mut key = vec![0u8; keylen];
    pbkdf2::pbkdf2_hmac::<Sha256>(secret.as_bytes(), salt.as_bytes(), iterations, &mut key);
    Ok(key)
}

/// Client-side WAMP-CRA: signs the router's challenge with the shared
/// secret, deriving a salted key first when the challenge carries
/// `salt`/`iterations`/`keylen`.
#[derive(Debug, Clone)]
pub struct WampCraAuthenticator {
    authid: String,
    secret: String,
    auth_extra: Value,
}

impl WampCraAuthenticator {
    pub fn new(authid: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            authid: authid.into(),
            secret: secret.into(),
            auth_extra: serde_json::json!({}),
        }
    }
}

impl ClientAuthenticator for WampCraAuthenticator {
    fn auth_method(&self) -> &'static str {
        "wampcra"
    }

    fn authid(&self) -> &str {
        &self.authid
    }

    fn auth_extra(&self) -> Value {
        self.auth_extra.clone()
    }

    fn authenticate(&self, challenge: &Challenge) -> Result<Authenticate, Error> {
        let challenge_str = challenge
            .details
            .get("challenge")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::AuthenticationFailed("wampcra challenge missing 'challenge' field".to_string())
            })?;

        let key: Vec<u8> = match (
            challenge.details.get("salt").and_then(Value::as_str),
            challenge.details.get("iterations").and_then(Value::as_u64),
            challenge.details.get("keylen").and_then(Value::as_u64),
        ) {
            (Some(salt), Some(iterations), Some(keylen)) => {
                derive_salted_key(&self.secret, salt, iterations as u32, keylen as usize)?
            }
            _ => self.secret.as_bytes().to_vec(),
        };

        let signature = sign_wampcra_challenge(challenge_str, &key)?;
        Ok(Authenticate {
            signature,
            details: serde_json::json!({}),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FrozenClock;
    impl Clock for FrozenClock {
        fn now_iso8601_millis(&self) -> String {
            "2024-01-01T00:00:00.000Z".to_string()
        }
    }

    #[test]
    fn challenge_blob_round_trips_fields() {
        let blob = generate_wampcra_challenge(1, "alice", "user", "dynamic", &FrozenClock).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(parsed["authmethod"], "wampcra");
        assert_eq!(parsed["authid"], "alice");
        assert_eq!(parsed["timestamp"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn client_signs_unsalted_challenge_and_server_verifies() {
        let challenge_str = generate_wampcra_challenge(1, "alice", "user", "dynamic", &FrozenClock).unwrap();
        let challenge = Challenge {
            authmethod: "wampcra".to_string(),
            details: serde_json::json!({"challenge": challenge_str}),
        };
        let authenticator = WampCraAuthenticator::new("alice", "secret123");
        let authenticate = authenticator.authenticate(&challenge).unwrap();
        assert!(verify_wampcra_signature(&authenticate.signature, &challenge_str, b"secret123").unwrap());
    }

    #[test]
    fn salted_challenge_uses_derived_key() {
        let challenge_str = generate_wampcra_challenge(1, "alice", "user", "dynamic", &FrozenClock).unwrap();
        let challenge = Challenge {
            authmethod: "wampcra".to_string(),
            details: serde_json::json!({
                "challenge": challenge_str,
                "salt": "saltsalt",
                "iterations": 1000,
                "keylen": 32,
            }),
        };
        let authenticator = WampCraAuthenticator::new("alice", "secret123");
        let authenticate = authenticator.authenticate(&challenge).unwrap();
        let key = derive_salted_key("secret123", "saltsalt", 1000, 32).unwrap();
        assert!(verify_wampcra_signature(&authenticate.signature, &challenge_str, &key).unwrap());
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let challenge_str = "hello".to_string();
        let signature = sign_wampcra_challenge(&challenge_str, b"secret").unwrap();
        assert!(!verify_wampcra_signature(&signature, &challenge_str, b"wrong-secret").unwrap());
    }
}
