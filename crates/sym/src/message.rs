//! The [`Envelope`] value and its compact JSON wire form.
//!
//! # Wire format
//!
//! ```text
//! {"a":"<algorithm name>","c":"<base64(ciphertext+tag)>","n":"<base64(nonce)>"}
//! ```
//!
//! Binary fields use the standard base64 alphabet without padding. The
//! algorithm travels by name rather than numeric tag so tags can be
//! renumbered without breaking stored envelopes.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::cipher;
use crate::error::{DecodeError, SymError};

/// An encrypted payload plus everything needed to open it, except the key.
///
/// Produced by [`crate::encrypt`] or [`Envelope::parse`]. Fields are public so
/// callers can inspect them; a tampered envelope makes [`crate::decrypt`]
/// return a [`SymError`], never panic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireEnvelope", into = "WireEnvelope")]
pub struct Envelope {
    /// Construction used to seal.
    pub algorithm: Algorithm,
    /// Ciphertext with the authentication tag appended.
    pub ciphertext: Vec<u8>,
    /// Per-message nonce.
    pub nonce: Vec<u8>,
}

impl Envelope {
    /// Serialize to the wire form as UTF-8 JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SymError::Encode`] if JSON serialization fails.
    pub fn marshal(&self) -> Result<Vec<u8>, SymError> {
        serde_json::to_vec(&WireEnvelope::from(self)).map_err(SymError::Encode)
    }

    /// Parse the wire form produced by [`Envelope::marshal`].
    ///
    /// # Errors
    ///
    /// - [`SymError::Decode`] if the input is not a JSON object with string
    ///   fields `a`, `c` and `n`, or a binary field is not valid base64.
    /// - [`SymError::UnknownAlgorithm`] if `a` names no registered algorithm.
    pub fn parse(data: &[u8]) -> Result<Self, SymError> {
        let wire: WireEnvelope = serde_json::from_slice(data).map_err(DecodeError::Json)?;
        Envelope::try_from(wire)
    }

    /// Decrypt this envelope. Shorthand for [`crate::decrypt`].
    ///
    /// # Errors
    ///
    /// See [`crate::decrypt`].
    pub fn open(&self, key: &[u8]) -> Result<Vec<u8>, SymError> {
        cipher::decrypt(Some(self), key)
    }
}

/// Parse a serialized envelope. Same as [`Envelope::parse`].
///
/// # Errors
///
/// See [`Envelope::parse`].
pub fn parse_envelope(data: &[u8]) -> Result<Envelope, SymError> {
    Envelope::parse(data)
}

/// On-the-wire shape of an [`Envelope`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireEnvelope {
    #[serde(rename = "a")]
    algorithm: String,
    #[serde(rename = "c")]
    ciphertext: String,
    #[serde(rename = "n")]
    nonce: String,
}

impl From<&Envelope> for WireEnvelope {
    fn from(envelope: &Envelope) -> Self {
        Self {
            algorithm: envelope.algorithm.name().to_owned(),
            ciphertext: STANDARD_NO_PAD.encode(&envelope.ciphertext),
            nonce: STANDARD_NO_PAD.encode(&envelope.nonce),
        }
    }
}

impl From<Envelope> for WireEnvelope {
    fn from(envelope: Envelope) -> Self {
        Self::from(&envelope)
    }
}

impl TryFrom<WireEnvelope> for Envelope {
    type Error = SymError;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        let ciphertext = decode_field("c", &wire.ciphertext)?;
        let nonce = decode_field("n", &wire.nonce)?;
        let algorithm = Algorithm::resolve(&wire.algorithm)?;
        Ok(Self {
            algorithm,
            ciphertext,
            nonce,
        })
    }
}

fn decode_field(field: &'static str, value: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD_NO_PAD
        .decode(value)
        .map_err(|source| DecodeError::Base64 { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope {
            algorithm: Algorithm::AesGcm,
            ciphertext: vec![0xde, 0xad, 0xbe, 0xef, 0x01],
            nonce: vec![7u8; 12],
        }
    }

    #[test]
    fn marshal_uses_short_keys() {
        let bytes = sample().marshal().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["a"], "aes-gcm");
        assert_eq!(obj["c"], "3q2+7wE");
        assert_eq!(obj["n"], "BwcHBwcHBwcHBwcH");
    }

    #[test]
    fn marshal_omits_padding() {
        let bytes = sample().marshal().unwrap();
        assert!(!String::from_utf8(bytes).unwrap().contains('='));
    }

    #[test]
    fn parse_round_trip() {
        let envelope = sample();
        let parsed = Envelope::parse(&envelope.marshal().unwrap()).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn parse_ignores_field_order() {
        let data = br#"{"n":"BwcHBwcHBwcHBwcH","c":"3q2+7wE","a":"aes-gcm"}"#;
        assert_eq!(parse_envelope(data).unwrap(), sample());
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(
            Envelope::parse(b"{\"a\":"),
            Err(SymError::Decode(DecodeError::Json(_)))
        ));
        assert!(matches!(
            Envelope::parse(b"not json"),
            Err(SymError::Decode(DecodeError::Json(_)))
        ));
    }

    #[test]
    fn parse_rejects_missing_field() {
        let data = br#"{"a":"aes-gcm","c":"3q2+7wE"}"#;
        assert!(matches!(
            Envelope::parse(data),
            Err(SymError::Decode(DecodeError::Json(_)))
        ));
    }

    #[test]
    fn parse_rejects_bad_base64() {
        let data = br#"{"a":"aes-gcm","c":"!!!","n":"BwcHBwcHBwcHBwcH"}"#;
        assert!(matches!(
            Envelope::parse(data),
            Err(SymError::Decode(DecodeError::Base64 { field: "c", .. }))
        ));
    }

    #[test]
    fn parse_rejects_padded_base64() {
        let data = br#"{"a":"aes-gcm","c":"3q2+7wE=","n":"BwcHBwcHBwcHBwcH"}"#;
        assert!(matches!(
            Envelope::parse(data),
            Err(SymError::Decode(DecodeError::Base64 { field: "c", .. }))
        ));
    }

    #[test]
    fn parse_rejects_unknown_algorithm() {
        let data = br#"{"a":"rot13","c":"3q2+7wE","n":"BwcHBwcHBwcHBwcH"}"#;
        assert!(matches!(
            Envelope::parse(data),
            Err(SymError::UnknownAlgorithm)
        ));
    }

    #[test]
    fn serde_embeds_in_larger_documents() {
        let doc = serde_json::json!({ "id": 7, "secret": sample() });
        assert_eq!(doc["secret"]["a"], "aes-gcm");

        let back: Envelope = serde_json::from_value(doc["secret"].clone()).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn serde_deserialize_rejects_unknown_algorithm() {
        let value = serde_json::json!({ "a": "rot13", "c": "", "n": "" });
        assert!(serde_json::from_value::<Envelope>(value).is_err());
    }
}
