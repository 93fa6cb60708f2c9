//! The closed registry of supported AEAD constructions.
//!
//! Each [`Algorithm`] has a stable external name (used on the wire) and a
//! numeric tag (used in-process). Adding a construction means adding a variant
//! and extending every `match` below; there is no fallthrough arm.

use std::fmt;
use std::str::FromStr;

use crate::error::SymError;

/// Wire name of [`Algorithm::AesGcm`].
pub const AES_GCM_NAME: &str = "aes-gcm";

/// A supported authenticated-encryption construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// AES-GCM with a 96-bit random nonce and a 128-bit tag.
    /// Key size (128 or 256 bits) is picked from the key length.
    #[default]
    AesGcm,
}

impl Algorithm {
    /// Resolve a wire name. Matching is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`SymError::UnknownAlgorithm`] for any name outside the registry.
    pub fn resolve(name: &str) -> Result<Self, SymError> {
        match name {
            AES_GCM_NAME => Ok(Algorithm::AesGcm),
            _ => Err(SymError::UnknownAlgorithm),
        }
    }

    /// Canonical wire name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::AesGcm => AES_GCM_NAME,
        }
    }

    /// Numeric tag.
    pub fn tag(self) -> u8 {
        match self {
            Algorithm::AesGcm => 0,
        }
    }

    /// Resolve a numeric tag.
    ///
    /// # Errors
    ///
    /// Returns [`SymError::UnknownAlgorithm`] for any tag outside the registry.
    pub fn from_tag(tag: u8) -> Result<Self, SymError> {
        match tag {
            0 => Ok(Algorithm::AesGcm),
            _ => Err(SymError::UnknownAlgorithm),
        }
    }

    /// Required nonce length in bytes.
    pub fn nonce_len(self) -> usize {
        match self {
            Algorithm::AesGcm => 12,
        }
    }

    /// Length in bytes of the authentication tag appended to every ciphertext.
    pub fn tag_len(self) -> usize {
        match self {
            Algorithm::AesGcm => 16,
        }
    }
}

/// Name for a raw tag, or `""` when the tag is unknown.
///
/// An empty result never means success; use [`Algorithm::from_tag`] when the
/// caller needs to act on an unknown tag.
pub fn name_for_tag(tag: u8) -> &'static str {
    Algorithm::from_tag(tag).map(Algorithm::name).unwrap_or("")
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::resolve(s)
    }
}

impl TryFrom<u8> for Algorithm {
    type Error = SymError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Algorithm::from_tag(tag)
    }
}
