//! Configuration loading and validation for the sealer binary.
//!
//! All values are read from `SEALER_*` environment variables at startup. The
//! process exits with a clear error message if any variable is missing or invalid.

use std::fmt;

use anyhow::{Context, Result};
use serde::Deserialize;
use sym::Algorithm;

use crate::key::KeyBytes;
use crate::pipe::Mode;

/// Validated sealer configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Standard base64 encoding of a 16- or 32-byte key. **Required.**
    pub key: String,

    /// `seal` or `open`.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Algorithm name used when sealing. Opening reads it from the envelope.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_mode() -> String {
    "seal".into()
}
fn default_algorithm() -> String {
    sym::algorithm::AES_GCM_NAME.into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("SEALER"))
            .build()
            .context("failed to build sealer configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise sealer configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Decoded key material.
    pub fn key_bytes(&self) -> Result<KeyBytes> {
        KeyBytes::from_base64(&self.key).context("SEALER_KEY is invalid")
    }

    /// Parsed operating mode.
    pub fn mode(&self) -> Result<Mode> {
        self.mode.parse().context("SEALER_MODE is invalid")
    }

    /// Resolved sealing algorithm.
    pub fn algorithm(&self) -> Result<Algorithm> {
        Algorithm::resolve(&self.algorithm)
            .with_context(|| format!("SEALER_ALGORITHM {:?} is not supported", self.algorithm))
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            anyhow::bail!("SEALER_KEY is required and must not be empty");
        }
        self.key_bytes()?;
        self.mode()?;
        self.algorithm()?;
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("key", &"[REDACTED]")
            .field("mode", &self.mode)
            .field("algorithm", &self.algorithm)
            .field("log_level", &self.log_level)
            .finish()
    }
}
