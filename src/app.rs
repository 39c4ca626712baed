//! Transfer workflow state and orchestration
//!
//! [`TransferApp`] owns everything the terminal front-end displays: the
//! connected account, the fetched balance and allowance, the form fields, the
//! single error slot, and the per-action in-flight flags. Each action runs
//! the validate/submit/confirm workflow against an injected [`TokenGateway`],
//! so the whole flow is testable without a network.

use crate::amount::TokenAmount;
use crate::client::TokenGateway;
use crate::error::{classify, eyre, TransferError};
use alloy::primitives::Address;
use tracing::{info, warn};

const BALANCE_FAILED_MSG: &str = "Failed to check balance. Please try again.";
const ALLOWANCE_FAILED_MSG: &str =
    "Failed to check allowance. Please ensure the 'From' address is valid.";
const INVALID_FIELDS_MSG: &str = "Please fill in all fields with valid values";
const MISSING_FROM_MSG: &str = "Please connect your wallet and enter the 'From' address";

/// A validated transfer, ready for submission.
///
/// Constructed from form state, submitted exactly once, then discarded.
#[derive(Debug, Clone)]
struct TransferRequest {
    sender: Address,
    recipient: Address,
    amount: TokenAmount,
}

/// Presentation state plus transfer orchestration over a token gateway.
pub struct TransferApp<G: TokenGateway> {
    gateway: G,
    connected: Address,

    /// Balance of the connected account, as of the last completed fetch
    pub balance: Option<TokenAmount>,
    /// Allowance for the last-queried (owner, connected) pair
    pub allowance: Option<TokenAmount>,
    /// Sender address field ("From")
    pub from_address: String,
    /// Recipient address field ("To")
    pub to_address: String,
    /// Amount field, decimal USDT
    pub amount: String,
    /// Single shared error slot; each action overwrites it
    pub error: Option<String>,

    checking_balance: bool,
    checking_allowance: bool,
    transferring: bool,
}

impl<G: TokenGateway> TransferApp<G> {
    /// Create an app bound to a gateway and the connected wallet address
    pub fn new(gateway: G, connected: Address) -> Self {
        Self {
            gateway,
            connected,
            balance: None,
            allowance: None,
            from_address: String::new(),
            to_address: String::new(),
            amount: String::new(),
            error: None,
            checking_balance: false,
            checking_allowance: false,
            transferring: false,
        }
    }

    /// The connected wallet address
    pub fn connected(&self) -> Address {
        self.connected
    }

    /// Shortened connected-account summary, e.g. `0x1234...abcd`
    pub fn connected_summary(&self) -> String {
        let full = self.connected.to_string();
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }

    /// Balance formatted for display (2 decimal places)
    pub fn balance_display(&self) -> Option<String> {
        self.balance.map(|balance| balance.format_display())
    }

    /// Allowance formatted for display (2 decimal places)
    pub fn allowance_display(&self) -> Option<String> {
        self.allowance.map(|allowance| allowance.format_display())
    }

    /// Whether a balance check is in flight
    pub fn is_checking_balance(&self) -> bool {
        self.checking_balance
    }

    /// Whether an allowance check is in flight
    pub fn is_checking_allowance(&self) -> bool {
        self.checking_allowance
    }

    /// Whether a transfer is in flight
    pub fn is_transferring(&self) -> bool {
        self.transferring
    }

    /// First-render pass once the wallet address is available: fetch the
    /// connected account's balance.
    pub async fn connect(&mut self) {
        self.check_balance().await;
    }

    /// Fetch the connected account's balance and update the display.
    ///
    /// No-op while a previous balance check is still in flight.
    pub async fn check_balance(&mut self) {
        if self.checking_balance {
            return;
        }
        self.checking_balance = true;
        self.error = None;

        match self.gateway.fetch_balance(self.connected).await {
            Ok(balance) => self.balance = Some(balance),
            Err(err) => {
                warn!("Balance check failed: {err:#}");
                self.error = Some(BALANCE_FAILED_MSG.to_string());
            }
        }

        self.checking_balance = false;
    }

    /// Fetch the allowance granted by the "From" address to the connected
    /// account.
    ///
    /// Fails fast with an input error when the "From" field is empty or does
    /// not parse as an address - no round-trip is attempted. No-op while a
    /// previous allowance check is still in flight.
    pub async fn check_allowance(&mut self) {
        if self.checking_allowance {
            return;
        }

        let Ok(owner) = self.from_address.trim().parse::<Address>() else {
            self.error = Some(MISSING_FROM_MSG.to_string());
            return;
        };

        self.checking_allowance = true;
        self.error = None;

        match self.gateway.fetch_allowance(owner, self.connected).await {
            Ok(allowance) => self.allowance = Some(allowance),
            Err(err) => {
                warn!("Allowance check failed: {err:#}");
                self.error = Some(ALLOWANCE_FAILED_MSG.to_string());
            }
        }

        self.checking_allowance = false;
    }

    /// Run the delegated transfer workflow:
    /// validate -> submit -> await confirmation -> reconcile.
    ///
    /// Validation failures never reach the gateway. On a confirmed success
    /// the balance and allowance are each re-fetched exactly once and the
    /// form fields are cleared; on any failure the fields stay populated and
    /// the classified error lands in the error slot. The in-flight flag is
    /// cleared on every exit path. No-op while a transfer is in flight.
    pub async fn transfer(&mut self) {
        if self.transferring {
            return;
        }

        let request = match self.validate_request() {
            Ok(request) => request,
            Err(err) => {
                self.error = Some(err.to_string());
                return;
            }
        };

        self.transferring = true;
        self.error = None;

        let tx_hash = match self
            .gateway
            .submit_transfer(request.sender, request.recipient, request.amount)
            .await
        {
            Ok(tx_hash) => tx_hash,
            Err(err) => {
                warn!("transferFrom submission failed: {err:#}");
                self.error = Some(classify(&err).to_string());
                self.transferring = false;
                return;
            }
        };
        info!("Transaction hash: {tx_hash}");

        let confirmation = match self.gateway.confirm(tx_hash).await {
            Ok(confirmation) => confirmation,
            Err(err) => {
                warn!("transferFrom confirmation failed: {err:#}");
                self.error = Some(classify(&err).to_string());
                self.transferring = false;
                return;
            }
        };

        if confirmation.success {
            info!(
                "transferFrom confirmed: tx_hash={}, block={:?}",
                confirmation.tx_hash, confirmation.block_number
            );
            // Reconcile: one balance re-fetch, one allowance re-fetch (the
            // latter still needs the populated "From" field), then clear the
            // form. The displayed amounts are only ever overwritten by the
            // re-fetches themselves.
            self.check_balance().await;
            self.check_allowance().await;
            self.clear_form();
        } else {
            self.error = Some(classify(&eyre!("Transaction failed")).to_string());
        }

        self.transferring = false;
    }

    /// Validate the form fields into a submittable request.
    ///
    /// All three fields must be non-empty, both addresses must parse, and
    /// the amount must be a positive decimal within the token's precision.
    fn validate_request(&self) -> Result<TransferRequest, TransferError> {
        let from = self.from_address.trim();
        let to = self.to_address.trim();
        let amount = self.amount.trim();

        if from.is_empty() || to.is_empty() || amount.is_empty() {
            return Err(TransferError::Input(INVALID_FIELDS_MSG.to_string()));
        }

        let sender: Address = from
            .parse()
            .map_err(|_| TransferError::Input(INVALID_FIELDS_MSG.to_string()))?;
        let recipient: Address = to
            .parse()
            .map_err(|_| TransferError::Input(INVALID_FIELDS_MSG.to_string()))?;
        let amount = TokenAmount::parse(amount)
            .map_err(|_| TransferError::Input(INVALID_FIELDS_MSG.to_string()))?;

        Ok(TransferRequest {
            sender,
            recipient,
            amount,
        })
    }

    /// Clear the transfer form fields. The displayed balance and allowance
    /// are left to the re-fetches.
    fn clear_form(&mut self) {
        self.from_address.clear();
        self.to_address.clear();
        self.amount.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Confirmation;
    use alloy::primitives::{TxHash, U256};
    use eyre::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::block_on;

    /// Gateway double with canned responses and call counters.
    struct MockGateway {
        balance: U256,
        allowance: U256,
        balance_error: Option<&'static str>,
        submit_error: Option<&'static str>,
        receipt_success: bool,
        balance_calls: AtomicUsize,
        allowance_calls: AtomicUsize,
        submit_calls: AtomicUsize,
    }

    impl Default for MockGateway {
        fn default() -> Self {
            Self {
                balance: U256::from(1_500_000u64),
                allowance: U256::ZERO,
                balance_error: None,
                submit_error: None,
                receipt_success: true,
                balance_calls: AtomicUsize::new(0),
                allowance_calls: AtomicUsize::new(0),
                submit_calls: AtomicUsize::new(0),
            }
        }
    }

    impl TokenGateway for MockGateway {
        async fn fetch_balance(&self, _owner: Address) -> Result<TokenAmount> {
            self.balance_calls.fetch_add(1, Ordering::SeqCst);
            match self.balance_error {
                Some(msg) => Err(eyre!(msg)),
                None => Ok(TokenAmount::from_raw(self.balance)),
            }
        }

        async fn fetch_allowance(&self, _owner: Address, _spender: Address) -> Result<TokenAmount> {
            self.allowance_calls.fetch_add(1, Ordering::SeqCst);
            Ok(TokenAmount::from_raw(self.allowance))
        }

        async fn submit_transfer(
            &self,
            _sender: Address,
            _recipient: Address,
            _amount: TokenAmount,
        ) -> Result<TxHash> {
            self.submit_calls.fetch_add(1, Ordering::SeqCst);
            match self.submit_error {
                Some(msg) => Err(eyre!(msg)),
                None => Ok(TxHash::ZERO),
            }
        }

        async fn confirm(&self, tx_hash: TxHash) -> Result<Confirmation> {
            Ok(Confirmation {
                tx_hash,
                block_number: Some(1),
                success: self.receipt_success,
            })
        }
    }

    fn make_app(gateway: MockGateway) -> TransferApp<MockGateway> {
        TransferApp::new(gateway, Address::from([9u8; 20]))
    }

    fn fill_form(app: &mut TransferApp<MockGateway>) {
        app.from_address = Address::from([1u8; 20]).to_string();
        app.to_address = Address::from([2u8; 20]).to_string();
        app.amount = "1.00".to_string();
    }

    #[test]
    fn test_connect_fetches_initial_balance() {
        block_on(async {
            let mut app = make_app(MockGateway::default());
            app.connect().await;

            assert_eq!(app.gateway.balance_calls.load(Ordering::SeqCst), 1);
            assert_eq!(app.balance_display().as_deref(), Some("1.50"));
            assert!(app.error.is_none());
        });
    }

    #[test]
    fn test_balance_failure_sets_message_and_clears_flag() {
        block_on(async {
            let mut app = make_app(MockGateway {
                balance_error: Some("connection refused"),
                ..Default::default()
            });
            app.check_balance().await;

            assert_eq!(app.error.as_deref(), Some(BALANCE_FAILED_MSG));
            assert!(app.balance.is_none());
            assert!(!app.is_checking_balance());
        });
    }

    #[test]
    fn test_allowance_requires_from_address() {
        block_on(async {
            let mut app = make_app(MockGateway::default());
            app.check_allowance().await;

            assert_eq!(app.error.as_deref(), Some(MISSING_FROM_MSG));
            assert_eq!(app.gateway.allowance_calls.load(Ordering::SeqCst), 0);
        });
    }

    #[test]
    fn test_allowance_rejects_malformed_address_without_round_trip() {
        block_on(async {
            let mut app = make_app(MockGateway::default());
            app.from_address = "0xnot-an-address".to_string();
            app.check_allowance().await;

            assert_eq!(app.error.as_deref(), Some(MISSING_FROM_MSG));
            assert_eq!(app.gateway.allowance_calls.load(Ordering::SeqCst), 0);
        });
    }

    #[test]
    fn test_zero_allowance_is_displayed() {
        block_on(async {
            let mut app = make_app(MockGateway::default());
            app.from_address = Address::from([1u8; 20]).to_string();
            app.check_allowance().await;

            assert_eq!(app.allowance_display().as_deref(), Some("0.00"));
            assert!(app.error.is_none());
        });
    }

    #[test]
    fn test_transfer_with_empty_fields_short_circuits() {
        block_on(async {
            let mut app = make_app(MockGateway::default());
            app.transfer().await;

            assert_eq!(app.error.as_deref(), Some(INVALID_FIELDS_MSG));
            assert_eq!(app.gateway.submit_calls.load(Ordering::SeqCst), 0);
            assert_eq!(app.gateway.balance_calls.load(Ordering::SeqCst), 0);
            assert!(!app.is_transferring());
        });
    }

    #[test]
    fn test_transfer_with_one_empty_field_short_circuits() {
        block_on(async {
            let mut app = make_app(MockGateway::default());
            fill_form(&mut app);
            app.to_address.clear();
            app.transfer().await;

            assert_eq!(app.error.as_deref(), Some(INVALID_FIELDS_MSG));
            assert_eq!(app.gateway.submit_calls.load(Ordering::SeqCst), 0);
        });
    }

    #[test]
    fn test_transfer_rejects_zero_and_negative_amounts() {
        block_on(async {
            for bad_amount in ["0", "-1"] {
                let mut app = make_app(MockGateway::default());
                fill_form(&mut app);
                app.amount = bad_amount.to_string();
                app.transfer().await;

                assert_eq!(app.error.as_deref(), Some(INVALID_FIELDS_MSG));
                assert_eq!(app.gateway.submit_calls.load(Ordering::SeqCst), 0);
            }
        });
    }

    #[test]
    fn test_successful_transfer_reconciles_state() {
        block_on(async {
            let mut app = make_app(MockGateway::default());
            fill_form(&mut app);
            app.transfer().await;

            assert_eq!(app.gateway.submit_calls.load(Ordering::SeqCst), 1);
            // exactly one balance re-fetch and one allowance re-fetch
            assert_eq!(app.gateway.balance_calls.load(Ordering::SeqCst), 1);
            assert_eq!(app.gateway.allowance_calls.load(Ordering::SeqCst), 1);
            // form cleared, displays kept
            assert!(app.from_address.is_empty());
            assert!(app.to_address.is_empty());
            assert!(app.amount.is_empty());
            assert_eq!(app.balance_display().as_deref(), Some("1.50"));
            assert!(app.error.is_none());
            assert!(!app.is_transferring());
        });
    }

    #[test]
    fn test_reverted_transfer_keeps_fields() {
        block_on(async {
            let mut app = make_app(MockGateway {
                receipt_success: false,
                ..Default::default()
            });
            fill_form(&mut app);
            app.transfer().await;

            assert_eq!(app.error.as_deref(), Some("Transaction failed"));
            // no reconciliation on failure
            assert_eq!(app.gateway.balance_calls.load(Ordering::SeqCst), 0);
            assert_eq!(app.gateway.allowance_calls.load(Ordering::SeqCst), 0);
            assert!(!app.from_address.is_empty());
            assert!(!app.amount.is_empty());
            assert!(!app.is_transferring());
        });
    }

    #[test]
    fn test_user_rejection_is_classified() {
        block_on(async {
            let mut app = make_app(MockGateway {
                submit_error: Some("User denied transaction signature"),
                ..Default::default()
            });
            fill_form(&mut app);
            app.transfer().await;

            assert_eq!(app.error.as_deref(), Some("Transaction rejected by user"));
            assert!(!app.is_transferring());
        });
    }

    #[test]
    fn test_insufficient_allowance_is_classified() {
        block_on(async {
            let mut app = make_app(MockGateway {
                submit_error: Some("execution reverted: ERC20: insufficient allowance"),
                ..Default::default()
            });
            fill_form(&mut app);
            // no client-side pre-check: the submission goes out even though
            // the fetched allowance is zero
            app.from_address = Address::from([1u8; 20]).to_string();
            app.check_allowance().await;
            assert_eq!(app.allowance_display().as_deref(), Some("0.00"));

            app.transfer().await;

            assert_eq!(app.gateway.submit_calls.load(Ordering::SeqCst), 1);
            assert_eq!(
                app.error.as_deref(),
                Some(TransferError::InsufficientAllowance.to_string().as_str())
            );
        });
    }

    #[test]
    fn test_latches_are_independent() {
        block_on(async {
            // an in-flight allowance check does not block a transfer
            let mut app = make_app(MockGateway::default());
            fill_form(&mut app);
            app.checking_allowance = true;
            app.transfer().await;
            assert_eq!(app.gateway.submit_calls.load(Ordering::SeqCst), 1);

            // and an in-flight transfer does not block an allowance check
            let mut app = make_app(MockGateway::default());
            app.from_address = Address::from([1u8; 20]).to_string();
            app.transferring = true;
            app.check_allowance().await;
            assert_eq!(app.gateway.allowance_calls.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn test_in_flight_transfer_is_not_reentered() {
        block_on(async {
            let mut app = make_app(MockGateway::default());
            fill_form(&mut app);
            app.transferring = true;
            app.transfer().await;

            assert_eq!(app.gateway.submit_calls.load(Ordering::SeqCst), 0);
        });
    }
}
