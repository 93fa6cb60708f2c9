//! `sealer` — seals stdin into a sym envelope, or opens one back to plaintext.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from `SEALER_*` environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Pipe stdin through [`pipe::run`] to stdout.
//!
//! [`Config`]: config::Config

mod config;
mod key;
mod pipe;
mod telemetry;

use anyhow::Result;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        eprintln!("ERROR: sealer configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Pipe
    // -----------------------------------------------------------------------
    let key = cfg.key_bytes()?;
    let result = pipe::run(
        cfg.mode()?,
        cfg.algorithm()?,
        &key,
        tokio::io::stdin(),
        tokio::io::stdout(),
    )
    .await;

    if let Err(e) = &result {
        error!(error = %e, "sealer failed");
    }
    result
}
