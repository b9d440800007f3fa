//! Solana RPC slice: connection handling, token lookup, and the metadata
//! update path.

pub mod client;
pub mod token;

pub use client::ChainClient;
pub use token::{TokenRecord, UpdateOutcome};
