//! Default endpoint constants for the maintainer commands.
//!
//! Every URL here can be overridden per run; see the builder in
//! [`crate::client`] and the `BUNDLR_NODE_URL` / `ARWEAVE_GATEWAY_URL` /
//! `SOLANA_RPC_URL` environment variables honored by the bins.

/// Default Bundlr node the upload account lives on.
pub const DEFAULT_NODE_URL: &str = "https://node1.bundlr.network";

/// Public gateway uploaded files are served from.
pub const DEFAULT_GATEWAY_URL: &str = "https://arweave.net";

/// Default Solana RPC endpoint (mainnet-beta).
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Currency selector the Bundlr node keys balances and prices by.
pub const CURRENCY: &str = "solana";
