//! High-level client: `MaintainerClient` wiring the Bundlr node and the
//! Solana RPC together.
//!
//! The two commands are linear call sequences over this client: the upload
//! flow (balance → price → fund-if-needed → sign → submit) and the URI
//! update flow (resolve → update). Each sub-client stays reachable for
//! callers that only need one side.

use solana_commitment_config::CommitmentConfig;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use std::time::Duration;

use crate::chain::token::UpdateOutcome;
use crate::chain::ChainClient;
use crate::error::{MaintainerError, StorageError};
use crate::network;
use crate::storage::item::DataItem;
use crate::storage::wire::UploadReceipt;
use crate::storage::BundlrClient;

/// Default interval between balance polls while waiting for funding to land.
const DEFAULT_FUNDING_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Default poll attempts before giving up on a funding credit.
const DEFAULT_FUNDING_POLL_ATTEMPTS: u32 = 60;

/// Everything the upload flow observed and produced, for reporting.
#[derive(Debug)]
pub struct UploadOutcome {
    /// Balance before any funding, in lamports.
    pub balance: u64,
    /// Price quoted for the item's serialized size, in lamports.
    pub price: u64,
    /// Lamports transferred to cover a shortfall, if any.
    pub funded: Option<u64>,
    /// The data item id.
    pub id: String,
    /// Public retrieval URL on the gateway.
    pub url: String,
    pub receipt: UploadReceipt,
}

pub struct MaintainerClient {
    storage: BundlrClient,
    chain: ChainClient,
    funding_poll_interval: Duration,
    funding_poll_attempts: u32,
}

impl MaintainerClient {
    pub fn builder() -> MaintainerClientBuilder {
        MaintainerClientBuilder::default()
    }

    pub fn storage(&self) -> &BundlrClient {
        &self.storage
    }

    pub fn chain(&self) -> &ChainClient {
        &self.chain
    }

    /// Run the full upload workflow for one data item.
    ///
    /// Funds exactly the shortfall (price − balance) when the balance
    /// cannot cover the quoted price, waits for the credit, then signs and
    /// submits. Signing happens only after a balance query confirms
    /// sufficiency.
    pub async fn upload(
        &self,
        keypair: &Keypair,
        mut item: DataItem,
    ) -> Result<UploadOutcome, MaintainerError> {
        let owner = keypair.pubkey();

        let balance = self.storage.balance(&owner).await?;
        let price = self.storage.price(item.size()).await?;
        tracing::debug!(balance, price, size = item.size(), "upload quote");

        let funded = match shortfall(balance, price) {
            Some(lamports) => {
                self.fund(keypair, lamports, price).await?;
                Some(lamports)
            }
            None => None,
        };

        item.sign(keypair)?;
        let receipt = self.storage.submit(&item).await?;

        Ok(UploadOutcome {
            balance,
            price,
            funded,
            url: self.storage.upload_url(&receipt.id),
            id: receipt.id.clone(),
            receipt,
        })
    }

    /// Resolve the token for `mint` and point its metadata URI at `uri`.
    pub async fn update_token_uri(
        &self,
        authority: &Keypair,
        mint: &Pubkey,
        uri: &str,
    ) -> Result<UpdateOutcome, MaintainerError> {
        let token = self.chain.find_token_by_mint(mint).await?;
        Ok(self.chain.update_token_uri(authority, &token, uri).await?)
    }

    /// Transfer `lamports` to the node's deposit address, register the
    /// transfer, and poll until the account balance reaches `required`.
    async fn fund(
        &self,
        keypair: &Keypair,
        lamports: u64,
        required: u64,
    ) -> Result<(), MaintainerError> {
        let info = self.storage.node_info().await?;
        let deposit = self.storage.deposit_address(&info)?;

        tracing::info!(%deposit, lamports, "funding bundlr account");
        let signature = self.chain.transfer(keypair, &deposit, lamports).await?;
        self.storage.register_funding(&signature.to_string()).await?;

        let mut credited = 0;
        for attempt in 0..self.funding_poll_attempts {
            credited = self.storage.balance(&keypair.pubkey()).await?;
            if credited >= required {
                tracing::debug!(credited, attempt, "funding credited");
                return Ok(());
            }
            futures_timer::Delay::new(self.funding_poll_interval).await;
        }

        Err(StorageError::FundingNotCredited { credited, required }.into())
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MaintainerClientBuilder {
    node_url: String,
    gateway_url: String,
    rpc_url: String,
    commitment: CommitmentConfig,
    funding_poll_interval: Duration,
    funding_poll_attempts: u32,
}

impl Default for MaintainerClientBuilder {
    fn default() -> Self {
        Self {
            node_url: network::DEFAULT_NODE_URL.to_string(),
            gateway_url: network::DEFAULT_GATEWAY_URL.to_string(),
            rpc_url: network::DEFAULT_RPC_URL.to_string(),
            commitment: CommitmentConfig::confirmed(),
            funding_poll_interval: DEFAULT_FUNDING_POLL_INTERVAL,
            funding_poll_attempts: DEFAULT_FUNDING_POLL_ATTEMPTS,
        }
    }
}

impl MaintainerClientBuilder {
    pub fn node_url(mut self, url: &str) -> Self {
        self.node_url = url.to_string();
        self
    }

    pub fn gateway_url(mut self, url: &str) -> Self {
        self.gateway_url = url.to_string();
        self
    }

    pub fn rpc_url(mut self, url: &str) -> Self {
        self.rpc_url = url.to_string();
        self
    }

    pub fn commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    /// How long to wait between balance polls after a funding transfer.
    pub fn funding_poll_interval(mut self, interval: Duration) -> Self {
        self.funding_poll_interval = interval;
        self
    }

    /// How many balance polls to attempt before giving up on a funding
    /// credit.
    pub fn funding_poll_attempts(mut self, attempts: u32) -> Self {
        self.funding_poll_attempts = attempts;
        self
    }

    pub fn build(self) -> Result<MaintainerClient, MaintainerError> {
        Ok(MaintainerClient {
            storage: BundlrClient::new(&self.node_url, &self.gateway_url, network::CURRENCY),
            chain: ChainClient::new(&self.rpc_url, self.commitment),
            funding_poll_interval: self.funding_poll_interval,
            funding_poll_attempts: self.funding_poll_attempts,
        })
    }
}

/// Lamports missing to cover `price`, if the balance falls short.
pub fn shortfall(balance: u64, price: u64) -> Option<u64> {
    (price > balance).then(|| price - balance)
}
