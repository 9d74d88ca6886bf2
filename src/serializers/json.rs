//! JSON wire serializer, grounded in `wampproto.serializers.json`.

use crate::error::Error;
use crate::messages::Messages;

use super::Serializer;

/// Serializes messages as JSON text, encoded as UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, message: &Messages) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(message)?)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Messages, Error> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Call;

    #[test]
    fn produces_textual_array() {
        let msg = Messages::from(Call {
            request_id: 1,
            options: serde_json::json!({}),
            procedure: "foo.bar".to_string(),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
            payload: None,
            payload_serializer: None,
        });
        let bytes = JsonSerializer.serialize(&msg).unwrap();
        assert_eq!(bytes, br#"[48,1,{},"foo.bar"]"#);
    }

    #[test]
    fn unknown_tag_is_a_fatal_parse_error() {
        let err = JsonSerializer.deserialize(b"[9999,1,2,3]").unwrap_err();
        assert!(err.to_string().contains("unknown message tag 9999"));
    }

    #[test]
    fn round_trips_via_messages_enum() {
        let msg = Messages::from(Call {
            request_id: 7,
            options: serde_json::json!({}),
            procedure: "io.xconn.test".to_string(),
            args: serde_json::Value::Null,
            kwargs: serde_json::Value::Null,
            payload: None,
            payload_serializer: None,
        });
        let bytes = JsonSerializer.serialize(&msg).unwrap();
        assert_eq!(JsonSerializer.deserialize(&bytes).unwrap(), msg);
    }
}
