//! Unified error types for the maintainer library.

use solana_pubkey::Pubkey;
use thiserror::Error;

/// Top-level error returned by every fallible operation in this crate.
#[derive(Error, Debug)]
pub enum MaintainerError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("Keypair error: {0}")]
    Keypair(#[from] KeypairError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Transport-layer errors against the Bundlr node's REST API.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unexpected response body: {0}")]
    InvalidBody(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Upload-workflow errors above the transport layer.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("node reports no deposit address for currency {currency}")]
    NoDepositAddress { currency: String },

    #[error("deposit address {address} is not a valid pubkey")]
    InvalidDepositAddress { address: String },

    #[error(
        "funding not credited: balance {credited} still below required {required} after waiting"
    )]
    FundingNotCredited { credited: u64, required: u64 },

    #[error("data item is not signed")]
    Unsigned,

    #[error("data item is owned by {owner} but signer is {signer}")]
    OwnerMismatch { owner: Pubkey, signer: Pubkey },

    #[error("node accepted upload under id {returned} but local id is {expected}")]
    IdMismatch { expected: String, returned: String },
}

/// Errors from the Solana RPC side.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("no token metadata found for mint {mint}")]
    TokenNotFound { mint: Pubkey },

    #[error("account {address} is owned by {owner}, not the token metadata program")]
    ForeignAccountOwner { address: Pubkey, owner: Pubkey },

    #[error("metadata account {address} failed to decode: {reason}")]
    InvalidMetadata { address: Pubkey, reason: String },

    #[error("metadata URI is {len} bytes, maximum is {max}")]
    UriTooLong { len: usize, max: usize },

    #[error("token {mint} is immutable")]
    Immutable { mint: Pubkey },

    #[error("instruction encoding failed: {0}")]
    InstructionEncode(#[from] std::io::Error),
}

/// Errors loading the signing keypair from disk.
#[derive(Error, Debug)]
pub enum KeypairError {
    #[error("failed to read keypair file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("keypair file {path} is not a JSON byte array: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("keypair file {path} does not hold a valid ed25519 secret key: {reason}")]
    InvalidKey { path: String, reason: String },
}
