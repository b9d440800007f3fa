//! Domain view of an on-chain token's metadata.

use solana_pubkey::Pubkey;
use solana_signature::Signature;

use crate::program::state::{Collection, Creator, DataV2, Metadata, Uses};

/// A token resolved by mint address, with its metadata decoded and the
/// stored NUL padding stripped.
#[derive(Debug, Clone)]
pub struct TokenRecord {
    pub mint: Pubkey,
    /// Address of the metadata PDA the update instruction writes to.
    pub metadata_address: Pubkey,
    pub update_authority: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    pub(crate) creators: Option<Vec<Creator>>,
    pub(crate) collection: Option<Collection>,
    pub(crate) uses: Option<Uses>,
}

impl TokenRecord {
    pub(crate) fn from_metadata(mint: Pubkey, metadata_address: Pubkey, meta: Metadata) -> Self {
        Self {
            mint,
            metadata_address,
            update_authority: meta.update_authority,
            name: trim_padding(&meta.data.name),
            symbol: trim_padding(&meta.data.symbol),
            uri: trim_padding(&meta.data.uri),
            seller_fee_basis_points: meta.data.seller_fee_basis_points,
            primary_sale_happened: meta.primary_sale_happened,
            is_mutable: meta.is_mutable,
            creators: meta.data.creators,
            collection: meta.collection,
            uses: meta.uses,
        }
    }

    /// The current data with only the URI replaced, ready to submit.
    pub(crate) fn data_with_uri(&self, uri: &str) -> DataV2 {
        DataV2 {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            uri: uri.to_string(),
            seller_fee_basis_points: self.seller_fee_basis_points,
            creators: self.creators.clone(),
            collection: self.collection.clone(),
            uses: self.uses.clone(),
        }
    }
}

/// Result of a confirmed metadata update.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub signature: Signature,
    pub mint: Pubkey,
    pub previous_uri: String,
    pub new_uri: String,
}

fn trim_padding(s: &str) -> String {
    s.trim_end_matches('\0').to_string()
}
