//! UsdtClient - main entry point for the SDK

use crate::amount::TokenAmount;
use crate::config::NetworkConfig;
use crate::contracts::IERC20;
use crate::signer::{TransactionSigner, TxRequest};
use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::sol_types::SolCall;
use alloy::transports::http::reqwest::Url;
use eyre::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

/// Type alias for read-only provider
type ReadProvider = Arc<RootProvider<Ethereum>>;

/// Confirmation summary of a submitted transaction.
#[derive(Debug, Clone)]
pub struct Confirmation {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block number where the transaction was included
    pub block_number: Option<u64>,
    /// Whether the receipt status indicates success
    pub success: bool,
}

/// On-chain collaborator surface the presentation layer depends on.
///
/// [`UsdtClient`] is the production implementation; tests substitute a mock
/// so the transfer workflow runs without a network.
pub trait TokenGateway: Send + Sync {
    /// Query the USDT balance of an account
    fn fetch_balance(&self, owner: Address) -> impl Future<Output = Result<TokenAmount>> + Send;

    /// Query the allowance granted by `owner` to `spender`
    fn fetch_allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> impl Future<Output = Result<TokenAmount>> + Send;

    /// Submit a delegated transfer, returning the transaction hash
    fn submit_transfer(
        &self,
        sender: Address,
        recipient: Address,
        amount: TokenAmount,
    ) -> impl Future<Output = Result<TxHash>> + Send;

    /// Await confirmation of a submitted transaction
    fn confirm(&self, tx_hash: TxHash) -> impl Future<Output = Result<Confirmation>> + Send;
}

/// Main client for interacting with the USDT contract
pub struct UsdtClient<S: TransactionSigner> {
    signer: S,
    config: NetworkConfig,
    provider: ReadProvider,
}

impl<S: TransactionSigner> UsdtClient<S> {
    /// Create a new UsdtClient
    pub async fn new(signer: S, config: NetworkConfig) -> Result<Self> {
        let url: Url = config.rpc_url.parse().context("Invalid RPC URL")?;
        // Read-only provider without fillers (we only do eth_call operations)
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url);

        Ok(Self {
            signer,
            config,
            provider: Arc::new(provider),
        })
    }

    /// Get the signer's address
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the network configuration
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Get the USDT balance of an account
    pub async fn get_balance(&self, owner: Address) -> Result<TokenAmount> {
        debug!("Querying balance: owner={}", owner);

        let call = IERC20::balanceOfCall { account: owner };

        let result: Bytes = self
            .provider
            .call(
                alloy::rpc::types::TransactionRequest::default()
                    .with_to(self.config.usdt)
                    .with_input(call.abi_encode()),
            )
            .await
            .context("Failed to call balanceOf")?;

        let decoded = IERC20::balanceOfCall::abi_decode_returns(&result)
            .context("Failed to decode balance")?;

        Ok(TokenAmount::from_raw(decoded))
    }

    /// Get the allowance granted by `owner` to `spender`
    pub async fn get_allowance(&self, owner: Address, spender: Address) -> Result<TokenAmount> {
        debug!("Querying allowance: owner={}, spender={}", owner, spender);

        let call = IERC20::allowanceCall { owner, spender };

        let result: Bytes = self
            .provider
            .call(
                alloy::rpc::types::TransactionRequest::default()
                    .with_to(self.config.usdt)
                    .with_input(call.abi_encode()),
            )
            .await
            .context("Failed to call allowance")?;

        let decoded = IERC20::allowanceCall::abi_decode_returns(&result)
            .context("Failed to decode allowance")?;

        Ok(TokenAmount::from_raw(decoded))
    }

    /// Submit a delegated transfer through the wallet session
    pub async fn transfer_from(
        &self,
        sender: Address,
        recipient: Address,
        amount: TokenAmount,
    ) -> Result<TxHash> {
        let call = IERC20::transferFromCall {
            sender,
            recipient,
            amount: amount.raw(),
        };
        let data = Bytes::from(call.abi_encode());

        let tx = TxRequest::new(self.config.usdt, data);
        let tx_hash = self
            .signer
            .sign_and_send(tx)
            .await
            .context("Failed to submit transferFrom")?;

        info!("Submitted transferFrom: tx_hash={}", tx_hash);
        Ok(tx_hash)
    }

    /// Wait for transaction confirmation
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Confirmation> {
        let receipt = self.signer.wait_for_receipt(tx_hash).await?;

        Ok(Confirmation {
            tx_hash,
            block_number: receipt.block_number,
            success: receipt.status(),
        })
    }
}

impl<S: TransactionSigner> TokenGateway for UsdtClient<S> {
    async fn fetch_balance(&self, owner: Address) -> Result<TokenAmount> {
        self.get_balance(owner).await
    }

    async fn fetch_allowance(&self, owner: Address, spender: Address) -> Result<TokenAmount> {
        self.get_allowance(owner, spender).await
    }

    async fn submit_transfer(
        &self,
        sender: Address,
        recipient: Address,
        amount: TokenAmount,
    ) -> Result<TxHash> {
        self.transfer_from(sender, recipient, amount).await
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<Confirmation> {
        self.wait_for_receipt(tx_hash).await
    }
}
