//! Crate-wide error taxonomy, per the error-handling design in the spec:
//! structural parse errors, protocol-state errors, authentication failures,
//! and the client-side `ApplicationError` promoted from a join-time Abort.
//! Operation errors (`no_such_procedure` and friends) are *not* part of
//! this enum — per spec they are modeled as the protocol's own Error
//! message and returned, not raised.

use crate::messages::validation::ValidationErrors;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A message's wire form failed the validation spec: wrong shape,
    /// bad length, wrong tag, or a bad field. All failures for a single
    /// message are collected here rather than stopping at the first.
    #[error("invalid message: {0}")]
    Validation(#[from] ValidationErrors),

    /// The JSON serializer could not encode or decode a value.
    #[error("json serializer error: {0}")]
    Json(#[from] serde_json::Error),

    /// The CBOR serializer could not encode or decode a value.
    #[error("cbor serializer error: {0}")]
    Cbor(String),

    /// The MessagePack serializer could not encode or decode a value.
    #[error("msgpack serializer error: {0}")]
    MsgPack(String),

    /// An unknown leading tag was seen while dispatching a message.
    #[error("unknown message tag {0}")]
    UnknownMessageTag(u64),

    /// A message arrived in a state where the component does not expect it
    /// (e.g. Welcome before Hello, Yield for an unknown invocation).
    #[error("protocol error in state {state}: {message}")]
    ProtocolState { state: &'static str, message: String },

    /// The peer's Abort during the join handshake, promoted into a raised
    /// error the embedder can match on.
    #[error("join aborted: {0}")]
    Application(ApplicationError),

    /// A requested conversion between `Messages` and one of its variants
    /// did not match the actual enum member.
    #[error("message is not the expected variant")]
    InvalidMessageEnumMember,

    /// Authentication failed during the join handshake (invalid
    /// credentials, bad signature, missing `authextra.pubkey`, etc.).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
}

/// `ApplicationError(reason, args, kwargs)` — an Abort received during the
/// join handshake, promoted to a raised error per spec §7.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationError {
    pub reason: String,
    pub args: Value,
    pub kwargs: Value,
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for ApplicationError {}

/// Canonical error URIs used by the routing cores, per spec §6.
pub mod uris {
    pub const NO_SUCH_PROCEDURE: &str = "wamp.error.no_such_procedure";
    pub const PROCEDURE_ALREADY_EXISTS: &str = "wamp.error.procedure_already_exists";
    pub const AUTHENTICATION_FAILED: &str = "wamp.error.authentication_failed";
    pub const INVALID_ARGUMENT: &str = "wamp.error.invalid_argument";
    pub const INVALID_URI: &str = "wamp.error.invalid_uri";
}

/// Canonical close/abort reasons, per spec §6.
pub mod close_uris {
    pub const SYSTEM_SHUTDOWN: &str = "wamp.close.system_shutdown";
    pub const CLOSE_REALM: &str = "wamp.close.close_realm";
    pub const GOODBYE_AND_OUT: &str = "wamp.close.goodbye_and_out";
    pub const KILLED: &str = "wamp.close.killed";
}
