//! Error types for the USDT SDK
//!
//! SDK methods use `eyre` for ergonomic error handling with context. The
//! user-facing taxonomy surfaced by the app lives in [`TransferError`].

pub use eyre::{eyre, Context, Report, Result};
use thiserror::Error;

/// User-facing failure categories surfaced in the app's error slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Missing or invalid form fields; never reaches the network
    #[error("{0}")]
    Input(String),

    /// The signer declined the action
    #[error("Transaction rejected by user")]
    UserRejected,

    /// The chain rejected the transfer for lack of allowance
    #[error(
        "Insufficient allowance. Please ensure the 'From' address has approved enough USDT for you to spend."
    )]
    InsufficientAllowance,

    /// Transport-level failure
    #[error("{0}")]
    Network(String),

    /// Response did not match the declared output type
    #[error("{0}")]
    Decode(String),
}

/// EIP-1193 rejection code emitted by wallets when the user declines.
const USER_REJECTED_CODE: &str = "4001";

/// Classify a raw failure into a user-facing category.
///
/// Pattern-matches the error chain text; anything unrecognized falls back to
/// [`TransferError::Network`] carrying the outermost message so the user sees
/// what actually went wrong.
pub fn classify(report: &Report) -> TransferError {
    let chain = report
        .chain()
        .map(|cause| cause.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join(": ");

    if chain.contains("rejected") || chain.contains("denied") || chain.contains(USER_REJECTED_CODE)
    {
        TransferError::UserRejected
    } else if chain.contains("insufficient allowance") {
        TransferError::InsufficientAllowance
    } else if chain.contains("decode") {
        TransferError::Decode(report.to_string())
    } else {
        TransferError::Network(report.to_string())
    }
}
