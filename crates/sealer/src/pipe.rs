//! Reads a payload, seals or opens it, and writes the result.

use std::str::FromStr;

use anyhow::{Context, Result};
use sym::{Algorithm, Envelope};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::key::KeyBytes;

/// What to do with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Plaintext in, serialized envelope out.
    Seal,
    /// Serialized envelope in, plaintext out.
    Open,
}

#[derive(Debug, Error)]
#[error("unknown mode {0:?}: expected `seal` or `open`")]
pub struct UnknownMode(String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seal" => Ok(Mode::Seal),
            "open" => Ok(Mode::Open),
            other => Err(UnknownMode(other.to_owned())),
        }
    }
}

/// Drain `reader`, transform its contents according to `mode`, and write the
/// result to `writer`.
///
/// # Errors
///
/// Returns an error on I/O failure or if sealing/opening fails.
pub async fn run<R, W>(
    mode: Mode,
    algorithm: Algorithm,
    key: &KeyBytes,
    mut reader: R,
    mut writer: W,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .await
        .context("failed to read input")?;

    let output = process(mode, algorithm, key, &input)?;

    writer
        .write_all(&output)
        .await
        .context("failed to write output")?;
    writer.flush().await.context("failed to flush output")?;

    info!(
        mode = ?mode,
        input_len = input.len(),
        output_len = output.len(),
        "payload processed"
    );
    Ok(())
}

/// Synchronous core of [`run`].
///
/// Sealed output is the envelope's JSON followed by a newline; surrounding
/// whitespace on envelope input is ignored.
pub fn process(mode: Mode, algorithm: Algorithm, key: &KeyBytes, input: &[u8]) -> Result<Vec<u8>> {
    match mode {
        Mode::Seal => {
            let envelope = sym::encrypt_using(input, key.as_bytes(), algorithm)
                .context("failed to seal payload")?;
            let mut wire = envelope.marshal().context("failed to serialise envelope")?;
            wire.push(b'\n');
            Ok(wire)
        }
        Mode::Open => {
            let envelope =
                Envelope::parse(input.trim_ascii()).context("failed to parse envelope")?;
            sym::decrypt(Some(&envelope), key.as_bytes()).context("failed to open envelope")
        }
    }
}
