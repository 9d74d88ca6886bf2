//! MessagePack wire serializer, grounded in `wampproto.serializers.msgpack`.

use crate::error::Error;
use crate::messages::Messages;

use super::Serializer;

/// Serializes messages as MessagePack binary arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackSerializer;

impl Serializer for MsgPackSerializer {
    fn serialize(&self, message: &Messages) -> Result<Vec<u8>, Error> {
        rmp_serde::to_vec(message).map_err(|e| Error::MsgPack(e.to_string()))
    }

    fn deserialize(&self, data: &[u8]) -> Result<Messages, Error> {
        rmp_serde::from_slice(data).map_err(|e| Error::MsgPack(e.to_string()))
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
        let bytes = MsgPackSerializer.serialize(&msg).unwrap();
        assert_eq!(MsgPackSerializer.deserialize(&bytes).unwrap(), msg);
    }
}
