//! Pure (no socket) encode/decode of the RawSocket transport's handshake
//! bytes and per-message frame header. Grounded in
//! `wampproto.transports.rawsocket`. Transport framing itself — reading
//! the header, then `length` more bytes from a socket — is the embedder's
//! job; this module only turns the fixed-size headers into values and back.

use crate::error::Error;

/// Handshake magic byte.
pub const MAGIC: u8 = 0x7F;

/// Largest `max_msg_size` the handshake can express: 16 MiB.
pub const PROTOCOL_MAX_MSG_SIZE: u32 = 1 << 24;

/// `max_msg_size` a peer should assume until a handshake says otherwise: 1 MiB.
pub const DEFAULT_MAX_MSG_SIZE: u32 = 1 << 20;

pub const SERIALIZER_TYPE_JSON: u8 = 1;
pub const SERIALIZER_TYPE_MSGPACK: u8 = 2;
pub const SERIALIZER_TYPE_CBOR: u8 = 3;

pub const MSG_TYPE_WAMP: u8 = 0;
pub const MSG_TYPE_PING: u8 = 1;
pub const MSG_TYPE_PONG: u8 = 2;

fn protocol_error(message: impl Into<String>) -> Error {
    Error::ProtocolState {
        state: "rawsocket",
        message: message.into(),
    }
}

/// The four-byte RawSocket handshake: negotiated serializer and the
/// sender's maximum acceptable message size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handshake {
    pub serializer: u8,
    pub max_msg_size: u32,
}

impl Handshake {
    /// `max_msg_size` must be a power of two between `2^9` and `2^24`
    /// inclusive — the only range the handshake's 4-bit exponent field can
    /// express.
    pub fn new(serializer: u8, max_msg_size: u32) -> Result<Self, Error> {
        if max_msg_size > PROTOCOL_MAX_MSG_SIZE || max_msg_size < 512 || !max_msg_size.is_power_of_two() {
            return Err(protocol_error(format!(
                "max_msg_size {max_msg_size} must be a power of two in [512, {PROTOCOL_MAX_MSG_SIZE}]"
            )));
        }
        Ok(Self { serializer, max_msg_size })
    }

    pub fn to_bytes(self) -> [u8; 4] {
        let exponent = self.max_msg_size.trailing_zeros() as u8 - 9;
        [MAGIC, (exponent << 4) | (self.serializer & 0x0F), 0x00, 0x00]
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() != 4 {
            return Err(protocol_error(format!("expected 4 bytes for handshake, got {}", data.len())));
        }
        if data[0] != MAGIC {
            return Err(protocol_error(format!("expected magic {MAGIC:#x}, got {:#x}", data[0])));
        }
        if data[2] != 0x00 || data[3] != 0x00 {
            return Err(protocol_error(format!(
                "expected 0x00 for third and fourth handshake bytes, got {:#x} and {:#x}",
                data[2], data[3]
            )));
        }
        let serializer = data[1] & 0x0F;
        let max_msg_size = 1u32 << ((data[1] >> 4) as u32 + 9);
        Ok(Self { serializer, max_msg_size })
    }
}

/// The four-byte per-message frame header: a one-byte kind and a 24-bit
/// big-endian payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub kind: u8,
    pub length: u32,
}

impl MessageHeader {
    pub fn new(kind: u8, length: u32) -> Result<Self, Error> {
        if length > PROTOCOL_MAX_MSG_SIZE {
            return Err(protocol_error(format!("frame length {length} exceeds {PROTOCOL_MAX_MSG_SIZE}")));
        }
        Ok(Self { kind, length })
    }

    pub fn to_bytes(self) -> [u8; 4] {
        let [_, b1, b2, b3] = self.length.to_be_bytes();
        [self.kind, b1, b2, b3]
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() != 4 {
            return Err(protocol_error(format!("expected 4 bytes for frame header, got {}", data.len())));
        }
        let length = u32::from_be_bytes([0, data[1], data[2], data[3]]);
        Ok(Self { kind: data[0], length })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_round_trips() {
        let hs = Handshake::new(SERIALIZER_TYPE_JSON, DEFAULT_MAX_MSG_SIZE).unwrap();
        let bytes = hs.to_bytes();
        let parsed = Handshake::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, hs);
    }

    #[test]
    fn handshake_rejects_bad_magic() {
        let err = Handshake::from_bytes(&[0x00, 0x00, 0x00, 0x00]);
        assert!(err.is_err());
    }

    #[test]
    fn handshake_rejects_non_power_of_two_size() {
        assert!(Handshake::new(SERIALIZER_TYPE_JSON, 1_000_000).is_err());
    }

    #[test]
    fn message_header_round_trips() {
        let header = MessageHeader::new(MSG_TYPE_WAMP, 1234).unwrap();
        let bytes = header.to_bytes();
        assert_eq!(MessageHeader::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn message_header_caps_at_max_size() {
        assert!(MessageHeader::new(MSG_TYPE_WAMP, PROTOCOL_MAX_MSG_SIZE + 1).is_err());
    }

    #[test]
    fn max_protocol_message_size_round_trips_through_handshake() {
        let hs = Handshake::new(SERIALIZER_TYPE_CBOR, PROTOCOL_MAX_MSG_SIZE).unwrap();
        let parsed = Handshake::from_bytes(&hs.to_bytes()).unwrap();
        assert_eq!(parsed.max_msg_size, PROTOCOL_MAX_MSG_SIZE);
    }
}
