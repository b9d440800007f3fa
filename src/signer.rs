//! Signing identity loaded from a local keypair file.
//!
//! Both commands authorize everything with the same wallet file, a JSON
//! array of 64 bytes in the `solana-keygen` format. The key lives in
//! memory only for the duration of the run.

use std::path::Path;

use solana_keypair::Keypair;

use crate::error::KeypairError;

/// Load a [`Keypair`] from a `solana-keygen`-style JSON byte-array file.
pub fn read_keypair_file(path: impl AsRef<Path>) -> Result<Keypair, KeypairError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|source| KeypairError::Read {
        path: display.clone(),
        source,
    })?;

    let bytes: Vec<u8> = serde_json::from_str(&raw).map_err(|source| KeypairError::Parse {
        path: display.clone(),
        source,
    })?;

    Keypair::try_from(bytes.as_slice()).map_err(|e| KeypairError::InvalidKey {
        path: display,
        reason: e.to_string(),
    })
}
