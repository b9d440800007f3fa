//! Constants for the Metaplex token-metadata program.
//!
//! Program id, PDA seed, discriminator, and field maxima matching the
//! on-chain program exactly. The maxima matter because metadata strings
//! are stored NUL-padded to these lengths.

use solana_pubkey::Pubkey;
use std::str::FromStr;

lazy_static::lazy_static! {
    /// Metaplex Token Metadata Program ID
    pub static ref TOKEN_METADATA_PROGRAM_ID: Pubkey =
        Pubkey::from_str("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s").unwrap();
}

/// PDA seed for metadata accounts: `["metadata", program_id, mint]`.
pub const METADATA_SEED: &[u8] = b"metadata";

/// Instruction discriminators (single byte indices)
pub mod instruction {
    pub const UPDATE_METADATA_ACCOUNT_V2: u8 = 15;
}

/// Maximum stored name length.
pub const MAX_NAME_LENGTH: usize = 32;

/// Maximum stored symbol length.
pub const MAX_SYMBOL_LENGTH: usize = 10;

/// Maximum stored URI length.
pub const MAX_URI_LENGTH: usize = 200;
