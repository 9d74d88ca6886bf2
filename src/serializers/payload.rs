//! Payload-passthrough encode/decode: carries an opaque pre-serialized
//! `args`/`kwargs` blob, independent of whatever serializer encodes the
//! enclosing message. Grounded in `wampproto.serializers.payload`.
//!
//! The raw (`0`) serializer is the one spot this module can't be a direct
//! port: the Python original hands back a native `bytes` object sitting
//! inside an otherwise CBOR/MessagePack-native list. Our `args`/`kwargs`
//! fields are typed as `serde_json::Value` across every serializer
//! (including CBOR/MessagePack, which go through the same message structs),
//! and JSON `Value` has no byte-string variant — so the raw payload is
//! carried as a single base64-encoded string in `args[0]` instead.

use base64::Engine;
use serde_json::Value;

use super::{CBOR_SERIALIZER_ID, JSON_SERIALIZER_ID, MSGPACK_SERIALIZER_ID, RAW_SERIALIZER_ID};
use crate::error::Error;

fn bad_payload(message: impl Into<String>) -> Error {
    Error::ProtocolState {
        state: "payload",
        message: message.into(),
    }
}

fn prepare_for_encode(args: &Value, kwargs: &Value) -> Option<Vec<Value>> {
    if args.is_null() && kwargs.is_null() {
        return None;
    }
    let mut data = Vec::new();
    if !args.is_null() {
        data.push(args.clone());
    }
    if !kwargs.is_null() {
        if args.is_null() {
            data.push(Value::Array(Vec::new()));
        }
        data.push(kwargs.clone());
    }
    Some(data)
}

fn decode(arr: Vec<Value>) -> Result<(Value, Value), Error> {
    if arr.is_empty() {
        return Ok((Value::Null, Value::Null));
    }
    if arr.len() > 2 {
        return Err(bad_payload("too many elements to decode a payload"));
    }
    if !arr[0].is_array() {
        return Err(bad_payload("payload args element is not an array"));
    }
    let kwargs = if arr.len() == 2 {
        if !arr[1].is_object() {
            return Err(bad_payload("payload kwargs element is not an object"));
        }
        arr[1].clone()
    } else {
        Value::Null
    };
    Ok((arr[0].clone(), kwargs))
}

fn encode_raw(args: &Value, kwargs: &Value) -> Result<Option<Vec<u8>>, Error> {
    if args.is_null() && kwargs.is_null() {
        return Ok(None);
    }
    if kwargs.as_object().is_some_and(|m| !m.is_empty()) {
        return Err(bad_payload("raw serializer does not carry kwargs"));
    }
    let arr = args
        .as_array()
        .filter(|a| a.len() == 1)
        .ok_or_else(|| bad_payload("raw serializer requires exactly one arg"))?;
    let encoded = arr[0]
        .as_str()
        .ok_or_else(|| bad_payload("raw serializer requires a base64-encoded string arg"))?;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map(Some)
        .map_err(|e| bad_payload(format!("invalid base64 payload: {e}")))
}

fn decode_raw(payload: &[u8]) -> (Value, Value) {
    let encoded = base64::engine::general_purpose::STANDARD.encode(payload);
    (Value::Array(vec![Value::String(encoded)]), Value::Null)
}

/// Encodes `args`/`kwargs` as an opaque blob using the named inner
/// serializer. Returns `None` when both are absent — nothing to carry.
pub fn encode_payload(
    serializer_id: u8,
    args: &Value,
    kwargs: &Value,
) -> Result<Option<Vec<u8>>, Error> {
    match serializer_id {
        RAW_SERIALIZER_ID => encode_raw(args, kwargs),
        JSON_SERIALIZER_ID => match prepare_for_encode(args, kwargs) {
            Some(data) => Ok(Some(serde_json::to_vec(&data)?)),
            None => Ok(None),
        },
        CBOR_SERIALIZER_ID => match prepare_for_encode(args, kwargs) {
            Some(data) => {
                let mut out = Vec::new();
                ciborium::into_writer(&data, &mut out).map_err(|e| Error::Cbor(e.to_string()))?;
                Ok(Some(out))
            }
            None => Ok(None),
        },
        MSGPACK_SERIALIZER_ID => match prepare_for_encode(args, kwargs) {
            Some(data) => rmp_serde::to_vec(&data)
                .map(Some)
                .map_err(|e| Error::MsgPack(e.to_string())),
            None => Ok(None),
        },
        other => Err(bad_payload(format!("serializer {other} not recognized"))),
    }
}

/// Decodes a payload blob produced by [`encode_payload`] with the same
/// `serializer_id` back into `(args, kwargs)`.
pub fn decode_payload(serializer_id: u8, payload: &[u8]) -> Result<(Value, Value), Error> {
    if payload.is_empty() {
        return Ok((Value::Null, Value::Null));
    }
    match serializer_id {
        RAW_SERIALIZER_ID => Ok(decode_raw(payload)),
        JSON_SERIALIZER_ID => {
            let arr: Vec<Value> = serde_json::from_slice(payload)?;
            decode(arr)
        }
        CBOR_SERIALIZER_ID => {
            let arr: Vec<Value> =
                ciborium::from_reader(payload).map_err(|e| Error::Cbor(e.to_string()))?;
            decode(arr)
        }
        MSGPACK_SERIALIZER_ID => {
            let arr: Vec<Value> =
                rmp_serde::from_slice(payload).map_err(|e| Error::MsgPack(e.to_string()))?;
            decode(arr)
        }
        other => Err(bad_payload(format!("serializer {other} not recognized"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_payload_round_trips_args_and_kwargs() {
        let args = json!([1, 2, 3]);
        let kwargs = json!({"a": 1});
        let bytes = encode_payload(JSON_SERIALIZER_ID, &args, &kwargs)
            .unwrap()
            .unwrap();
        assert_eq!(decode_payload(JSON_SERIALIZER_ID, &bytes).unwrap(), (args, kwargs));
    }

    #[test]
    fn absent_args_and_kwargs_encode_to_nothing() {
        assert_eq!(
            encode_payload(JSON_SERIALIZER_ID, &Value::Null, &Value::Null).unwrap(),
            None
        );
    }

    #[test]
    fn kwargs_without_args_get_an_empty_args_array() {
        let kwargs = json!({"a": 1});
        let bytes = encode_payload(CBOR_SERIALIZER_ID, &Value::Null, &kwargs)
            .unwrap()
            .unwrap();
        let (args, decoded_kwargs) = decode_payload(CBOR_SERIALIZER_ID, &bytes).unwrap();
        assert_eq!(args, json!([]));
        assert_eq!(decoded_kwargs, kwargs);
    }

    #[test]
    fn raw_payload_round_trips_bytes() {
        let bytes = b"opaque wire bytes".to_vec();
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let args = json!([encoded]);
        let payload = encode_payload(RAW_SERIALIZER_ID, &args, &Value::Null)
            .unwrap()
            .unwrap();
        assert_eq!(payload, bytes);
        let (decoded_args, decoded_kwargs) =
            decode_payload(RAW_SERIALIZER_ID, &payload).unwrap();
        assert_eq!(decoded_args, args);
        assert_eq!(decoded_kwargs, Value::Null);
    }

    #[test]
    fn msgpack_payload_round_trips() {
        let args = json!(["hello"]);
        let kwargs = Value::Null;
        let bytes = encode_payload(MSGPACK_SERIALIZER_ID, &args, &kwargs)
            .unwrap()
            .unwrap();
        assert_eq!(
            decode_payload(MSGPACK_SERIALIZER_ID, &bytes).unwrap(),
            (args, Value::Null)
        );
    }
}
