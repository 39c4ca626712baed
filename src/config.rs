//! Network configuration for the USDT SDK

use alloy::primitives::Address;

/// Network configuration containing the RPC URL and token address (Ethereum mainnet)
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Chain ID (1 for Ethereum mainnet)
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: String,
    /// USDT token address
    pub usdt: Address,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkConfig {
    /// Create Ethereum mainnet configuration (default)
    pub fn new() -> Self {
        let rpc_url =
            std::env::var("ETH_RPC_URL").expect("ETH_RPC_URL environment variable must be set");

        Self {
            chain_id: 1,
            rpc_url,
            usdt: "0xdAC17F958D2ee523a2206206994597C13D831ec7"
                .parse()
                .unwrap(),
        }
    }

    /// Alias for new() - Ethereum mainnet configuration
    pub fn mainnet() -> Self {
        Self::new()
    }

    /// Create custom configuration with specific RPC URL
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }
}
