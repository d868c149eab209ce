//! Codec trait and implementations for serializing/deserializing messages.
//!
//! The hosting layer decodes raw payload bytes into [`Intent`](crate::Intent)
//! values before they reach the room core, and encodes outbound
//! [`Signal`](crate::Signal)s on the way back out. Which wire format is in
//! play is a codec concern; the room core never touches bytes.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes Rust types to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` because the codec is shared across connection
/// tasks for the lifetime of the process.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Matches the wire format the browser client already speaks: tagged
/// message objects with camelCase field names.
///
/// ## Example
///
/// ```rust
/// use skirmish_protocol::{Codec, Intent, JsonCodec};
///
/// let codec = JsonCodec;
/// let raw = br#"{"type":"damage","data":{"id":"s-2","value":25}}"#;
/// let intent: Intent = codec.decode(raw).unwrap();
/// assert!(matches!(intent, Intent::Damage(_)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
