//! USDT SDK for Rust
//!
//! A small Rust SDK for inspecting USDT balances and spending allowances and
//! executing delegated transfers (`transferFrom`) on Ethereum mainnet.
//!
//! # Features
//!
//! - Query a token balance and a spending allowance
//! - Submit a delegated transfer through a signing wallet session
//! - Track the transfer to confirmation and reconcile app state
//!
//! # Example
//!
//! ```rust,ignore
//! use usdt_sdk::{LocalSigner, NetworkConfig, TransferApp, UsdtClient};
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let config = NetworkConfig::default();
//!     let signer = LocalSigner::from_private_key("0x...", &config.rpc_url).await?;
//!     let client = UsdtClient::new(signer, config).await?;
//!     let connected = client.address();
//!
//!     let mut app = TransferApp::new(client, connected);
//!     app.connect().await;
//!
//!     app.from_address = "0x...".to_string();
//!     app.to_address = "0x...".to_string();
//!     app.amount = "1.50".to_string();
//!     app.transfer().await;
//!
//!     Ok(())
//! }
//! ```

pub mod amount;
pub mod app;
pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod signer;

// Re-export main types for convenience
pub use amount::{TokenAmount, USDT_DECIMALS};
pub use app::TransferApp;
pub use client::{Confirmation, TokenGateway, UsdtClient};
pub use config::NetworkConfig;
pub use error::{classify, eyre, Context, Report, Result, TransferError};
pub use signer::{LocalSigner, TransactionSigner, TxRequest};
