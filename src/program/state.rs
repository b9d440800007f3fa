//! Borsh layout of the metadata account, as the program stores it.
//!
//! Accounts are allocated at a fixed size and the unused tail is
//! zero-filled, so deserialization must tolerate trailing padding;
//! [`Metadata::safe_deserialize`] reads the prefix and ignores the rest.
//! Later program versions append more optional fields after `uses`; the
//! zero padding makes those read as `None` on older accounts, and the
//! update instruction never touches them either way.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    /// Royalty share, in percent.
    pub share: u8,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub verified: bool,
    pub key: Pubkey,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Uses {
    /// UseMethod enum tag (burn / multiple / single).
    pub use_method: u8,
    pub remaining: u64,
    pub total: u64,
}

/// The stored `data` field of a metadata account.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Data {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
}

/// Payload of `UpdateMetadataAccountV2` (`data` plus collection and uses).
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct DataV2 {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub collection: Option<Collection>,
    pub uses: Option<Uses>,
}

/// On-chain metadata account, read up to the fields the updater needs.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Account discriminator; always [`Metadata::KEY`] for metadata
    /// accounts.
    pub key: u8,
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub data: Data,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    pub edition_nonce: Option<u8>,
    /// TokenStandard enum tag.
    pub token_standard: Option<u8>,
    pub collection: Option<Collection>,
    pub uses: Option<Uses>,
}

impl Metadata {
    /// Key byte identifying a MetadataV1 account.
    pub const KEY: u8 = 4;

    /// Deserialize from raw account data, ignoring the zero padding after
    /// the last field.
    pub fn safe_deserialize(data: &[u8]) -> Result<Self, borsh::io::Error> {
        let metadata = Self::deserialize_reader(&mut &data[..])?;
        if metadata.key != Self::KEY {
            return Err(borsh::io::Error::new(
                borsh::io::ErrorKind::InvalidData,
                format!("account key {} is not a metadata account", metadata.key),
            ));
        }
        Ok(metadata)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A metadata account the way the program would store it: borsh bytes
    /// followed by zero padding, strings NUL-padded to their maxima.
    pub(crate) fn stored_metadata(uri: &str) -> (Metadata, Vec<u8>) {
        let pad = |s: &str, max: usize| {
            let mut padded = s.to_string();
            padded.push_str(&"\0".repeat(max - s.len()));
            padded
        };

        let metadata = Metadata {
            key: Metadata::KEY,
            update_authority: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            data: Data {
                name: pad("Whitelist Token", 32),
                symbol: pad("WLT", 10),
                uri: pad(uri, 200),
                seller_fee_basis_points: 0,
                creators: Some(vec![Creator {
                    address: Pubkey::new_unique(),
                    verified: true,
                    share: 100,
                }]),
            },
            primary_sale_happened: false,
            is_mutable: true,
            edition_nonce: Some(255),
            token_standard: Some(2),
            collection: None,
            uses: None,
        };

        let mut bytes = borsh::to_vec(&metadata).unwrap();
        bytes.resize(679, 0);
        (metadata, bytes)
    }

    #[test]
    fn test_safe_deserialize_ignores_padding() {
        let (metadata, bytes) = stored_metadata("https://arweave.net/abc");
        let decoded = Metadata::safe_deserialize(&bytes).unwrap();
        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_safe_deserialize_rejects_wrong_key() {
        let (_, mut bytes) = stored_metadata("https://arweave.net/abc");
        bytes[0] = 1; // EditionV1
        assert!(Metadata::safe_deserialize(&bytes).is_err());
    }

    #[test]
    fn test_safe_deserialize_rejects_truncated_account() {
        let (_, bytes) = stored_metadata("https://arweave.net/abc");
        assert!(Metadata::safe_deserialize(&bytes[..40]).is_err());
    }

    #[test]
    fn test_data_v2_round_trip() {
        let data = DataV2 {
            name: "Whitelist Token".into(),
            symbol: "WLT".into(),
            uri: "https://arweave.net/abc".into(),
            seller_fee_basis_points: 500,
            creators: None,
            collection: Some(Collection {
                verified: false,
                key: Pubkey::new_unique(),
            }),
            uses: None,
        };
        let bytes = borsh::to_vec(&data).unwrap();
        assert_eq!(DataV2::try_from_slice(&bytes).unwrap(), data);
    }
}
