//! Symmetric authenticated-encryption envelopes.
//!
//! [`encrypt`] seals a payload into a self-describing [`Envelope`] (algorithm,
//! nonce, ciphertext+tag); [`Envelope::marshal`] turns it into compact JSON and
//! [`Envelope::parse`] back; [`decrypt`] verifies and opens it.
//!
//! ```
//! let key = [0x11u8; 32];
//! let envelope = sym::encrypt(b"Hello World", &key)?;
//! let wire = envelope.marshal()?;
//!
//! let parsed = sym::parse_envelope(&wire)?;
//! assert_eq!(sym::decrypt(Some(&parsed), &key)?, b"Hello World");
//! # Ok::<(), sym::SymError>(())
//! ```
//!
//! Nothing here logs key material, nonces, or plaintext. `tracing` events carry
//! only algorithm names, lengths, and error kinds.

pub mod algorithm;
pub mod cipher;
pub mod error;
pub mod message;

pub use algorithm::{name_for_tag, Algorithm};
pub use cipher::{decrypt, encrypt, encrypt_using, encrypt_with_algorithm};
pub use error::{DecodeError, SymError};
pub use message::{parse_envelope, Envelope};
