//! Instruction builder for `UpdateMetadataAccountV2`.

use borsh::BorshSerialize;
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::program::constants::{instruction, TOKEN_METADATA_PROGRAM_ID};
use crate::program::state::DataV2;

/// Create an account meta for a writable account.
fn writable(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, false)
}

/// Create an account meta for a read-only signer.
fn signer(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, true)
}

/// Arguments of `UpdateMetadataAccountV2`. Every field is optional; `None`
/// leaves the corresponding on-chain value untouched.
#[derive(BorshSerialize, Debug, Clone, Default)]
pub struct UpdateMetadataAccountV2Args {
    pub data: Option<DataV2>,
    pub new_update_authority: Option<Pubkey>,
    pub primary_sale_happened: Option<bool>,
    pub is_mutable: Option<bool>,
}

/// Build the UpdateMetadataAccountV2 instruction.
///
/// Accounts:
/// 0. metadata (mut) - Metadata PDA of the mint
/// 1. update_authority (signer)
pub fn build_update_metadata_account_v2_ix(
    metadata: &Pubkey,
    update_authority: &Pubkey,
    args: &UpdateMetadataAccountV2Args,
) -> Result<Instruction, borsh::io::Error> {
    let keys = vec![writable(*metadata), signer(*update_authority)];

    let mut data = vec![instruction::UPDATE_METADATA_ACCOUNT_V2];
    args.serialize(&mut data)?;

    Ok(Instruction {
        program_id: *TOKEN_METADATA_PROGRAM_ID,
        accounts: keys,
        data,
    })
}
