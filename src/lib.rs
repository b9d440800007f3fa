//! # token-maintainer
//!
//! Library behind the two whitelist-token maintenance commands:
//!
//! - `bundlr-upload` — upload the token's metadata file (or logo) to
//!   Arweave through a funded Bundlr account.
//! - `update-metadata` — point the token's on-chain metadata URI at the
//!   uploaded file.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — endpoint constants, errors, keypair loading
//! 2. **Program** — token-metadata program layout: PDAs, account state,
//!    instruction building
//! 3. **Storage** — ANS-104 data items + the Bundlr node client
//! 4. **Chain** — Solana RPC: token lookup, URI update, funding transfers
//! 5. **High-Level Client** — `MaintainerClient` running the full flows
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use token_maintainer::prelude::*;
//!
//! let client = MaintainerClient::builder().build()?;
//! let keypair = read_keypair_file("wallet.json")?;
//!
//! let item = DataItem::new(keypair.pubkey(), metadata_bytes, vec![]);
//! let outcome = client.upload(&keypair, item).await?;
//! println!("File address: {}", outcome.url);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Unified error types.
pub mod error;

/// Default endpoint constants.
pub mod network;

/// Keypair-file loading.
pub mod signer;

/// HTTP retry policies.
pub mod http;

// ── Layer 2: Program ─────────────────────────────────────────────────────────

/// Token-metadata program interaction: PDAs, state, instructions.
pub mod program;

// ── Layer 3: Storage ─────────────────────────────────────────────────────────

/// Bundlr storage: data items and the node client.
pub mod storage;

// ── Layer 4: Chain ───────────────────────────────────────────────────────────

/// Solana RPC operations.
pub mod chain;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `MaintainerClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::chain::{ChainClient, TokenRecord, UpdateOutcome};
    pub use crate::client::{shortfall, MaintainerClient, MaintainerClientBuilder, UploadOutcome};
    pub use crate::error::{
        ChainError, HttpError, KeypairError, MaintainerError, StorageError,
    };
    pub use crate::network::{CURRENCY, DEFAULT_GATEWAY_URL, DEFAULT_NODE_URL, DEFAULT_RPC_URL};
    pub use crate::signer::read_keypair_file;
    pub use crate::storage::{BundlrClient, DataItem, Tag, UploadReceipt};

    pub use solana_commitment_config::CommitmentConfig;
    pub use solana_keypair::Keypair;
    pub use solana_pubkey::Pubkey;
    pub use solana_signer::Signer;
}
