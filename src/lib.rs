#![crate_name = "wamp_core"]
#![warn(missing_docs)]

//! Sans-I/O core of a WAMP v2 Basic+Advanced Profile implementation: the
//! message model, the join handshake (`Joiner`/`Acceptor`), client-side
//! correlation bookkeeping (`Session`), and the router-side routing cores
//! (`Dealer`/`Broker`). Every public operation is a pure function of
//! `(state, incoming message) -> (new state, outgoing messages)` — no
//! sockets, threads, locks, or timers live in this crate.

/// The closed message family: variants, validation, and wire marshal/parse.
pub mod messages;

pub mod roles;
/// WAMP roles.
pub use roles::Roles;

/// Crate-wide error taxonomy.
pub mod error;

/// Convenience builder macros' auto-incrementing id helper.
pub mod factories;

/// URI validation built on the WAMP URI grammar.
pub mod uri;

/// WAMP URI grammar rules (loose/strict) backing [`uri`].
pub mod regex;

/// Session/scope id generation.
pub mod id;

/// Shared router/session value types (`SessionDetails`, `Registration`, ...).
pub mod types;

/// Per-auth-method client/server challenge-response strategies.
pub mod auth;

/// Client-side join handshake state machine.
pub mod joiner;

/// Router-side join handshake state machine.
pub mod acceptor;

/// Client-side request/response correlation bookkeeping.
pub mod session;

/// RPC routing core.
pub mod dealer;

/// Pub-sub routing core.
pub mod broker;

/// Wire serializers (JSON/CBOR/MessagePack) and payload passthrough.
pub mod serializers;

/// Pure (no socket) RawSocket handshake and frame-header encode/decode.
pub mod rawsocket;

pub use serde;
pub use serde_json;
pub use serde_repr;
pub use lazy_static;

pub use messages::*;
pub use error::{ApplicationError, Error};
pub use factories::*;
pub use uri::*;
