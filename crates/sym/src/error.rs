//! Error types for the envelope library.

use thiserror::Error;

/// Every failure a [`crate::encrypt`], [`crate::decrypt`] or
/// [`crate::Envelope::parse`] call can produce.
///
/// Callers should branch on the variant, not on the rendered message.
#[derive(Debug, Error)]
pub enum SymError {
    /// The algorithm name or tag is outside the supported set.
    #[error("unknown algorithm")]
    UnknownAlgorithm,

    /// The key is neither 16 nor 32 bytes long.
    #[error("invalid key: expected 16 or 32 bytes, got {len}")]
    InvalidKey { len: usize },

    /// `decrypt` was called without an envelope.
    #[error("envelope must be provided")]
    MessageMissing,

    /// The envelope is structurally unusable: empty or wrong-length nonce, or
    /// a ciphertext too short to carry an authentication tag.
    #[error("invalid envelope details")]
    InvalidMessage,

    /// The authentication tag did not verify.
    ///
    /// Deliberately says nothing about which component was wrong.
    #[error("message authentication failed")]
    AuthenticationFailed,

    /// The serialized envelope could not be decoded.
    #[error("envelope decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The envelope could not be serialized.
    #[error("envelope encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The primitive refused to seal (plaintext beyond the AES-GCM size limit).
    #[error("aead seal failed")]
    SealFailed,

    /// The random source could not produce a nonce.
    #[error("random source failure: {0}")]
    Entropy(String),
}

/// Structural problems found while parsing the wire form.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not valid JSON, or a required field is missing or of the wrong type.
    #[error("malformed envelope: {0}")]
    Json(#[from] serde_json::Error),

    /// A binary field is not valid unpadded standard base64.
    #[error("field `{field}` is not valid base64: {source}")]
    Base64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },
}

impl SymError {
    /// Short, stable label for the variant. Safe to put in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SymError::UnknownAlgorithm => "unknown_algorithm",
            SymError::InvalidKey { .. } => "invalid_key",
            SymError::MessageMissing => "message_missing",
            SymError::InvalidMessage => "invalid_message",
            SymError::AuthenticationFailed => "authentication_failed",
            SymError::Decode(_) => "decode_error",
            SymError::Encode(_) => "encode_error",
            SymError::SealFailed => "seal_failed",
            SymError::Entropy(_) => "entropy_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            SymError::UnknownAlgorithm.kind(),
            SymError::InvalidKey { len: 3 }.kind(),
            SymError::MessageMissing.kind(),
            SymError::InvalidMessage.kind(),
            SymError::AuthenticationFailed.kind(),
            SymError::SealFailed.kind(),
            SymError::Entropy("x".into()).kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn invalid_key_display_includes_length() {
        let e = SymError::InvalidKey { len: 24 };
        assert!(e.to_string().contains("24"));
    }

    #[test]
    fn decode_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: SymError = DecodeError::from(json_err).into();
        assert!(matches!(e, SymError::Decode(DecodeError::Json(_))));
        assert_eq!(e.kind(), "decode_error");
    }
}
