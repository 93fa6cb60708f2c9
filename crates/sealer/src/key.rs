//! [`KeyBytes`]: owned key material decoded from configuration.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Errors produced while decoding a configured key.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The value is not standard base64.
    #[error("key is not valid base64")]
    InvalidEncoding,

    /// The decoded key is neither 16 nor 32 bytes.
    #[error("key has invalid length: expected 16 or 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Key buffer holding a 16- or 32-byte AES key.
///
/// Overwritten with zeroes on drop; never printed.
#[derive(Clone)]
pub struct KeyBytes(Vec<u8>);

impl KeyBytes {
    /// Decode a standard (padded) base64 key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidEncoding`] for malformed base64 and
    /// [`KeyError::InvalidLength`] for any size other than 16 or 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| KeyError::InvalidEncoding)?;
        match bytes.len() {
            16 | 32 => Ok(KeyBytes(bytes)),
            len => Err(KeyError::InvalidLength(len)),
        }
    }

    /// Borrow the raw key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for KeyBytes {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyBytes([REDACTED])")
    }
}
