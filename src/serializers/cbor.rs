//! CBOR wire serializer, grounded in `wampproto.serializers.cbor`.

use crate::error::Error;
use crate::messages::Messages;

use super::Serializer;

/// Serializes messages as CBOR binary arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct CborSerializer;

impl Serializer for CborSerializer {
    fn serialize(&self, message: &Messages) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        ciborium::into_writer(message, &mut out).map_err(|e| Error::Cbor(e.to_string()))?;
        Ok(out)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Messages, Error> {
        ciborium::from_reader(data).map_err(|e| Error::Cbor(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Welcome;

    #[test]
    fn round_trips_a_welcome() {
        let msg = Messages::from(Welcome {
            session: 9129137332,
            details: serde_json::json!({"roles": {"broker": {}}}),
        });
        let bytes = CborSerializer.serialize(&msg).unwrap();
        assert_eq!(CborSerializer.deserialize(&bytes).unwrap(), msg);
    }
}
