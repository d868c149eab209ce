//! Error types for the protocol layer.

/// Errors that can occur while moving messages across the boundary.
///
/// The hosting layer maps these onto whatever its transport reports to
/// clients; the room core only ever sees values that decoded cleanly.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The payload decoded but violates a protocol rule, such as a
    /// non-finite transform coordinate or an out-of-range value.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
