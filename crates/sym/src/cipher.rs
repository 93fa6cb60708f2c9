//! Sealing and opening of [`Envelope`]s.
//!
//! **Nonces:** every seal draws a fresh 96-bit nonce from the OS CSPRNG. With
//! AES-GCM a repeated (key, nonce) pair breaks both confidentiality and
//! authentication, so nonces are never derived or accepted from callers.
//!
//! **Keys:** only 16-byte (AES-128) and 32-byte (AES-256) keys are accepted.
//! 24-byte AES-192 keys are rejected on purpose.
//!
//! **Decrypt check order:** missing envelope, empty nonce or ciphertext, key
//! length, algorithm, exact nonce length and minimum ciphertext length, then
//! the tag. Everything before the tag check reports a specific error; a tag
//! mismatch reports only [`SymError::AuthenticationFailed`].

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes128Gcm, Aes256Gcm, Nonce,
};
use tracing::debug;

use crate::algorithm::Algorithm;
use crate::error::SymError;
use crate::message::Envelope;

/// AES-128 key length in bytes.
pub const AES_128_KEY_LEN: usize = 16;

/// AES-256 key length in bytes.
pub const AES_256_KEY_LEN: usize = 32;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Source of nonce bytes.
///
/// The library only ever uses [`OsNonceSource`]; the trait exists so seal-path
/// failures of the random source can be exercised in tests.
#[cfg_attr(test, mockall::automock)]
pub trait NonceSource {
    /// Fill `nonce` completely with unpredictable bytes.
    fn fill_nonce(&self, nonce: &mut [u8]) -> Result<(), SymError>;
}

/// [`NonceSource`] backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsNonceSource;

impl NonceSource for OsNonceSource {
    fn fill_nonce(&self, nonce: &mut [u8]) -> Result<(), SymError> {
        OsRng
            .try_fill_bytes(nonce)
            .map_err(|e| SymError::Entropy(e.to_string()))
    }
}

/// Encrypt `plaintext` with AES-GCM.
///
/// # Errors
///
/// Returns [`SymError::InvalidKey`] if `key` is not 16 or 32 bytes.
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Envelope, SymError> {
    encrypt_using(plaintext, key, Algorithm::AesGcm)
}

/// Encrypt `plaintext` with the algorithm registered under `algorithm`.
///
/// # Errors
///
/// Returns [`SymError::InvalidKey`] if `key` is not 16 or 32 bytes, and
/// [`SymError::UnknownAlgorithm`] if `algorithm` is not a registered name.
pub fn encrypt_with_algorithm(
    plaintext: &[u8],
    key: &[u8],
    algorithm: &str,
) -> Result<Envelope, SymError> {
    check_key_len(key)?;
    let algorithm = Algorithm::resolve(algorithm)?;
    encrypt_using(plaintext, key, algorithm)
}

/// Encrypt `plaintext` with an already-resolved [`Algorithm`].
///
/// # Errors
///
/// Returns [`SymError::InvalidKey`] if `key` is not 16 or 32 bytes.
pub fn encrypt_using(
    plaintext: &[u8],
    key: &[u8],
    algorithm: Algorithm,
) -> Result<Envelope, SymError> {
    seal_with(&OsNonceSource, plaintext, key, algorithm)
}

pub(crate) fn seal_with<S: NonceSource + ?Sized>(
    nonces: &S,
    plaintext: &[u8],
    key: &[u8],
    algorithm: Algorithm,
) -> Result<Envelope, SymError> {
    let cipher = AesGcmCipher::new(key)?;

    match algorithm {
        Algorithm::AesGcm => {
            let mut nonce = [0u8; NONCE_LEN];
            nonces.fill_nonce(&mut nonce)?;

            let ciphertext = cipher.seal(&nonce, plaintext)?;
            debug!(
                algorithm = %algorithm,
                plaintext_len = plaintext.len(),
                ciphertext_len = ciphertext.len(),
                "sealed envelope"
            );

            Ok(Envelope {
                algorithm,
                ciphertext,
                nonce: nonce.to_vec(),
            })
        }
    }
}

/// Decrypt `envelope` with `key` and return the original plaintext.
///
/// `None` stands in for an absent envelope.
///
/// # Errors
///
/// - [`SymError::MessageMissing`] if `envelope` is `None`.
/// - [`SymError::InvalidMessage`] if the nonce or ciphertext is empty, the
///   nonce is not exactly 12 bytes, or the ciphertext is shorter than the tag.
/// - [`SymError::InvalidKey`] if `key` is not 16 or 32 bytes.
/// - [`SymError::AuthenticationFailed`] if the tag does not verify.
pub fn decrypt(envelope: Option<&Envelope>, key: &[u8]) -> Result<Vec<u8>, SymError> {
    open(envelope, key).inspect_err(|e| debug!(kind = e.kind(), "envelope rejected"))
}

fn open(envelope: Option<&Envelope>, key: &[u8]) -> Result<Vec<u8>, SymError> {
    let envelope = envelope.ok_or(SymError::MessageMissing)?;
    if envelope.nonce.is_empty() || envelope.ciphertext.is_empty() {
        return Err(SymError::InvalidMessage);
    }
    let cipher = AesGcmCipher::new(key)?;

    match envelope.algorithm {
        Algorithm::AesGcm => {
            // Fixed by the construction; `Nonce::from_slice` panics on any other length.
            let nonce: &[u8; NONCE_LEN] = envelope
                .nonce
                .as_slice()
                .try_into()
                .map_err(|_| SymError::InvalidMessage)?;
            if envelope.ciphertext.len() < TAG_LEN {
                return Err(SymError::InvalidMessage);
            }

            let plaintext = cipher.open(nonce, &envelope.ciphertext)?;
            debug!(
                algorithm = %envelope.algorithm,
                plaintext_len = plaintext.len(),
                "opened envelope"
            );
            Ok(plaintext)
        }
    }
}

fn check_key_len(key: &[u8]) -> Result<(), SymError> {
    match key.len() {
        AES_128_KEY_LEN | AES_256_KEY_LEN => Ok(()),
        len => Err(SymError::InvalidKey { len }),
    }
}

/// AES-GCM keyed for either supported key size.
enum AesGcmCipher {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

impl AesGcmCipher {
    fn new(key: &[u8]) -> Result<Self, SymError> {
        check_key_len(key)?;
        let built = match key.len() {
            AES_128_KEY_LEN => Aes128Gcm::new_from_slice(key).map(Self::Aes128),
            _ => Aes256Gcm::new_from_slice(key).map(Self::Aes256),
        };
        built.map_err(|_| SymError::InvalidKey { len: key.len() })
    }

    fn seal(&self, nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Vec<u8>, SymError> {
        let nonce = Nonce::from_slice(nonce);
        let sealed = match self {
            Self::Aes128(c) => c.encrypt(nonce, plaintext),
            Self::Aes256(c) => c.encrypt(nonce, plaintext),
        };
        sealed.map_err(|_| SymError::SealFailed)
    }

    fn open(&self, nonce: &[u8; NONCE_LEN], ciphertext: &[u8]) -> Result<Vec<u8>, SymError> {
        let nonce = Nonce::from_slice(nonce);
        let opened = match self {
            Self::Aes128(c) => c.decrypt(nonce, ciphertext),
            Self::Aes256(c) => c.decrypt(nonce, ciphertext),
        };
        opened.map_err(|_| SymError::AuthenticationFailed)
    }
}
