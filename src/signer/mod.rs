//! Transaction signer abstraction for the USDT SDK
//!
//! This module provides a trait-based abstraction for the wallet session: the
//! client encodes calldata and hands it to a signer for signing, broadcast,
//! and confirmation tracking.

mod local;

pub use local::LocalSigner;

use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionReceipt;
use eyre::Result;

/// Transaction request parameters
#[derive(Debug, Clone)]
pub struct TxRequest {
    /// Target contract address
    pub to: Address,
    /// Encoded calldata
    pub data: Bytes,
}

impl TxRequest {
    /// Create a new transaction request
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
        }
    }
}

/// Trait for signing and sending EVM transactions
///
/// Implementations own the authenticated session: they know the acting
/// address and how to get a signed transaction onto the chain.
pub trait TransactionSigner: Send + Sync {
    /// Returns the signer's EVM address
    fn address(&self) -> Address;

    /// Signs and sends a transaction, returning the transaction hash
    fn sign_and_send(
        &self,
        tx: TxRequest,
    ) -> impl std::future::Future<Output = Result<TxHash>> + Send;

    /// Waits for a transaction to be confirmed and returns the receipt
    fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl std::future::Future<Output = Result<TransactionReceipt>> + Send;
}
