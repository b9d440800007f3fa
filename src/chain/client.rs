//! RPC client for the Solana side of both commands.
//!
//! Wraps the nonblocking [`RpcClient`] at a single commitment level and
//! exposes the three operations the maintainer needs: resolve a token by
//! mint, rewrite its metadata URI, and transfer lamports (Bundlr funding).
//! No retry on any write; a failed send propagates to the caller.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::chain::token::{TokenRecord, UpdateOutcome};
use crate::error::ChainError;
use crate::program::constants::{MAX_URI_LENGTH, TOKEN_METADATA_PROGRAM_ID};
use crate::program::instructions::{
    build_update_metadata_account_v2_ix, UpdateMetadataAccountV2Args,
};
use crate::program::pda::get_metadata_pda;
use crate::program::state::Metadata;

pub struct ChainClient {
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl ChainClient {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
            commitment,
        }
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }

    /// Resolve a token by its mint address.
    ///
    /// Fails with [`ChainError::TokenNotFound`] when the mint has no
    /// metadata account, and never touches any other account.
    pub async fn find_token_by_mint(&self, mint: &Pubkey) -> Result<TokenRecord, ChainError> {
        let (metadata_address, _) = get_metadata_pda(mint);
        tracing::debug!(%mint, %metadata_address, "resolving token metadata");

        let account = self
            .rpc
            .get_account_with_commitment(&metadata_address, self.commitment)
            .await?
            .value
            .ok_or(ChainError::TokenNotFound { mint: *mint })?;

        if account.owner != *TOKEN_METADATA_PROGRAM_ID {
            return Err(ChainError::ForeignAccountOwner {
                address: metadata_address,
                owner: account.owner,
            });
        }

        let metadata =
            Metadata::safe_deserialize(&account.data).map_err(|e| ChainError::InvalidMetadata {
                address: metadata_address,
                reason: e.to_string(),
            })?;

        Ok(TokenRecord::from_metadata(*mint, metadata_address, metadata))
    }

    /// Rewrite the token's metadata URI, leaving every other field as it
    /// is stored. Returns once the transaction is confirmed.
    pub async fn update_token_uri(
        &self,
        authority: &Keypair,
        token: &TokenRecord,
        uri: &str,
    ) -> Result<UpdateOutcome, ChainError> {
        if uri.len() > MAX_URI_LENGTH {
            return Err(ChainError::UriTooLong {
                len: uri.len(),
                max: MAX_URI_LENGTH,
            });
        }
        if !token.is_mutable {
            return Err(ChainError::Immutable { mint: token.mint });
        }
        if authority.pubkey() != token.update_authority {
            // The program will reject the signature downstream.
            tracing::warn!(
                signer = %authority.pubkey(),
                update_authority = %token.update_authority,
                "signer is not the token's update authority"
            );
        }

        let args = UpdateMetadataAccountV2Args {
            data: Some(token.data_with_uri(uri)),
            ..Default::default()
        };
        let ix = build_update_metadata_account_v2_ix(
            &token.metadata_address,
            &authority.pubkey(),
            &args,
        )?;

        let blockhash = self.rpc.get_latest_blockhash().await?;
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&authority.pubkey()),
            &[authority],
            blockhash,
        );
        let signature = self.rpc.send_and_confirm_transaction(&tx).await?;
        tracing::debug!(%signature, mint = %token.mint, "metadata URI updated");

        Ok(UpdateOutcome {
            signature,
            mint: token.mint,
            previous_uri: token.uri.clone(),
            new_uri: uri.to_string(),
        })
    }

    /// Transfer lamports from the keypair to a recipient and wait for
    /// confirmation. Used to fund the Bundlr deposit address.
    pub async fn transfer(
        &self,
        from: &Keypair,
        to: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, ChainError> {
        let ix = solana_system_interface::instruction::transfer(&from.pubkey(), to, lamports);
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let tx =
            Transaction::new_signed_with_payer(&[ix], Some(&from.pubkey()), &[from], blockhash);
        let signature = self.rpc.send_and_confirm_transaction(&tx).await?;
        tracing::debug!(%signature, %to, lamports, "funding transfer confirmed");
        Ok(signature)
    }
}
