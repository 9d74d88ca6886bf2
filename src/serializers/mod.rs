//! Wire serializers: encode/decode a [`Messages`] into its wire form.
//!
//! Grounded in `wampproto.serializers.*`. The teacher carried no serializer
//! abstraction of its own — every message serialized itself directly via
//! `serde_json` — so this trait is new scaffolding layered over the
//! existing per-message `Serialize`/`Deserialize` impls, not a rewrite of
//! them.

mod cbor;
mod json;
mod msgpack;
pub mod payload;

pub use cbor::CborSerializer;
pub use json::JsonSerializer;
pub use msgpack::MsgPackSerializer;

use crate::error::Error;
use crate::messages::Messages;

/// Canonical serializer ids, used both for `x_payload_serializer` and for
/// RawSocket handshake negotiation, per spec.
pub const RAW_SERIALIZER_ID: u8 = 0;
pub const JSON_SERIALIZER_ID: u8 = 1;
pub const MSGPACK_SERIALIZER_ID: u8 = 2;
pub const CBOR_SERIALIZER_ID: u8 = 3;

/// Encodes/decodes a [`Messages`] to and from its wire form. JSON produces
/// UTF-8 text bytes; CBOR and MessagePack produce binary. Deserializing
/// dispatches on the message's leading integer tag; an unrecognized tag is
/// a fatal parse error (`Error::UnknownMessageTag`), matching `Messages`'s
/// own `Deserialize` impl.
pub trait Serializer {
    fn serialize(&self, message: &Messages) -> Result<Vec<u8>, Error>;
    fn deserialize(&self, data: &[u8]) -> Result<Messages, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Call;

    fn round_trips(ser: &dyn Serializer) {
        let msg = Messages::from(Call {
            request_id: 7,
            options: serde_json::json!({}),
            procedure: "foo.bar".to_string(),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
            payload: None,
            payload_serializer: None,
        });
        let bytes = ser.serialize(&msg).unwrap();
        assert_eq!(ser.deserialize(&bytes).unwrap(), msg);
    }

    #[test]
    fn every_serializer_round_trips_a_call() {
        round_trips(&JsonSerializer);
        round_trips(&CborSerializer);
        round_trips(&MsgPackSerializer);
    }
}
