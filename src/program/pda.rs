//! PDA derivation for metadata accounts.

use solana_pubkey::Pubkey;

use crate::program::constants::{METADATA_SEED, TOKEN_METADATA_PROGRAM_ID};

/// Derive the metadata account address for a mint.
pub fn get_metadata_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}
