//! Error types for the protocol layer.
//!
//! Each crate of the engine defines its own error enum, so a
//! `ProtocolError` always means "the message itself was wrong", never
//! "the game refused the move".

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing fields, an unknown
    /// request `type` tag.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message parsed but breaks a protocol rule, e.g. a guess that
    /// carries two characters or a game id that is not 32 hex digits.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
