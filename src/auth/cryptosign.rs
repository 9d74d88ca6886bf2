//! Cryptosign: Ed25519 challenge/response. Grounded in
//! `wampproto.auth.cryptosign`.
//!
//! The combined signature format is `hex(signature) || hex(challenge)`,
//! 192 hex chars total — the source's PyNaCl `verify()` call signs and
//! verifies the challenge as one "signed message" blob (signature prefix
//! plus the original message appended). `ed25519-dalek` only exposes a
//! detached verify, so here the 96 raw bytes are split into the 64-byte
//! signature and the 32-byte challenge before `verify_strict`.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde_json::Value;

use super::ClientAuthenticator;
use crate::error::Error;
use crate::messages::{Authenticate, Challenge};

const CHALLENGE_LEN: usize = 32;
const SIGNATURE_LEN: usize = 64;

fn auth_failed(message: impl Into<String>) -> Error {
    Error::AuthenticationFailed(message.into())
}

fn decode_signing_key(private_key_hex: &str) -> Result<SigningKey, Error> {
    let bytes = hex::decode(private_key_hex)
        .map_err(|e| auth_failed(format!("invalid cryptosign private key: {e}")))?;
    let array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| auth_failed("cryptosign private key must be 32 bytes"))?;
    Ok(SigningKey::from_bytes(&array))
}

/// Generates a fresh Ed25519 keypair, returned as `(public_key_hex, private_key_hex)`.
pub fn generate_cryptosign_keypair() -> (String, String) {
    let signing_key = SigningKey::generate(&mut OsRng);
    (
        hex::encode(signing_key.verifying_key().to_bytes()),
        hex::encode(signing_key.to_bytes()),
    )
}

/// Generates a fresh 32-byte, hex-encoded challenge.
pub fn generate_cryptosign_challenge() -> String {
    hex::encode(rand::random::<[u8; CHALLENGE_LEN]>())
}

/// Signs a hex-encoded challenge, returning `hex(signature) || hex(challenge)`.
pub fn sign_cryptosign_challenge(challenge_hex: &str, private_key_hex: &str) -> Result<String, Error> {
    let signing_key = decode_signing_key(private_key_hex)?;
    let challenge_bytes = hex::decode(challenge_hex)
        .map_err(|e| auth_failed(format!("invalid cryptosign challenge: {e}")))?;
    let signature = signing_key.sign(&challenge_bytes);
    Ok(format!("{}{}", hex::encode(signature.to_bytes()), challenge_hex))
}

/// Verifies a combined `hex(signature) || hex(challenge)` string against a
/// public key. A malformed or non-matching signature returns `Ok(false)`,
/// not an error — the caller (the acceptor) decides whether that's fatal.
pub fn verify_cryptosign_signature(combined_hex: &str, public_key_hex: &str) -> Result<bool, Error> {
    let combined = match hex::decode(combined_hex) {
        Ok(bytes) => bytes,
        Err(_) => return Ok(false),
    };
    if combined.len() != SIGNATURE_LEN + CHALLENGE_LEN {
        return Ok(false);
    }
    let (sig_bytes, challenge_bytes) = combined.split_at(SIGNATURE_LEN);
    let sig_array: [u8; SIGNATURE_LEN] = sig_bytes.try_into().expect("checked length above");
    let signature = Signature::from_bytes(&sig_array);

    let public_bytes = hex::decode(public_key_hex)
        .map_err(|e| auth_failed(format!("invalid cryptosign public key: {e}")))?;
    let public_array: [u8; 32] = public_bytes
        .try_into()
        .map_err(|_| auth_failed("cryptosign public key must be 32 bytes"))?;
    let verifying_key = VerifyingKey::from_bytes(&public_array)
        .map_err(|e| auth_failed(format!("invalid cryptosign public key: {e}")))?;

    Ok(verifying_key.verify_strict(challenge_bytes, &signature).is_ok())
}

/// Client-side Cryptosign: publishes the Ed25519 public key in
/// `authextra.pubkey` (derived from the private key when absent) and
/// signs challenges with it.
#[derive(Debug, Clone)]
pub struct CryptosignAuthenticator {
    authid: String,
    private_key_hex: String,
    auth_extra: Value,
}

impl CryptosignAuthenticator {
    pub fn new(authid: impl Into<String>, private_key_hex: impl Into<String>) -> Self {
        Self::with_auth_extra(authid, private_key_hex, serde_json::json!({}))
    }

    /// Like [`new`](Self::new), but seeds `authextra` with caller-supplied
    /// keys (e.g. `pubkey` already known) before filling in any that are
    /// missing.
    pub fn with_auth_extra(
        authid: impl Into<String>,
        private_key_hex: impl Into<String>,
        mut auth_extra: Value,
    ) -> Self {
        let private_key_hex = private_key_hex.into();
        if auth_extra.get("pubkey").is_none() {
            if let Ok(signing_key) = decode_signing_key(&private_key_hex) {
                let pubkey = hex::encode(signing_key.verifying_key().to_bytes());
                match auth_extra.as_object_mut() {
                    Some(obj) => {
                        obj.insert("pubkey".to_string(), Value::String(pubkey));
                    }
                    None => auth_extra = serde_json::json!({ "pubkey": pubkey }),
                }
            }
        }
        Self {
            authid: authid.into(),
            private_key_hex,
            auth_extra,
        }
    }
}

impl ClientAuthenticator for CryptosignAuthenticator {
    fn auth_method(&self) -> &'static str {
        "cryptosign"
    }

    fn authid(&self) -> &str {
        &self.authid
    }

    fn auth_extra(&self) -> Value {
        self.auth_extra.clone()
    }

    fn authenticate(&self, challenge: &Challenge) -> Result<Authenticate, Error> {
        let challenge_hex = challenge
            .details
            .get("challenge")
            .and_then(Value::as_str)
            .ok_or_else(|| auth_failed("cryptosign challenge missing 'challenge' field"))?;
        let signature = sign_cryptosign_challenge(challenge_hex, &self.private_key_hex)?;
        Ok(Authenticate {
            signature,
            details: serde_json::json!({}),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trip() {
        let (public_key, private_key) = generate_cryptosign_keypair();
        let challenge = generate_cryptosign_challenge();
        let combined = sign_cryptosign_challenge(&challenge, &private_key).unwrap();
        assert!(verify_cryptosign_signature(&combined, &public_key).unwrap());
    }

    #[test]
    fn bit_flip_in_signature_is_rejected() {
        let (public_key, private_key) = generate_cryptosign_keypair();
        let challenge = generate_cryptosign_challenge();
        let combined = sign_cryptosign_challenge(&challenge, &private_key).unwrap();
        let mut bytes = combined.into_bytes();
        bytes[0] = if bytes[0] == b'0' { b'1' } else { b'0' };
        let tampered = String::from_utf8(bytes).unwrap();
        assert!(!verify_cryptosign_signature(&tampered, &public_key).unwrap());
    }

    #[test]
    fn derives_pubkey_from_private_key_when_absent() {
        let (public_key, private_key) = generate_cryptosign_keypair();
        let authenticator = CryptosignAuthenticator::new("alice", private_key);
        assert_eq!(authenticator.auth_extra()["pubkey"], public_key);
    }

    #[test]
    fn wrong_public_key_is_rejected() {
        let (_public_key, private_key) = generate_cryptosign_keypair();
        let (other_public_key, _) = generate_cryptosign_keypair();
        let challenge = generate_cryptosign_challenge();
        let combined = sign_cryptosign_challenge(&challenge, &private_key).unwrap();
        assert!(!verify_cryptosign_signature(&combined, &other_public_key).unwrap());
    }
}
