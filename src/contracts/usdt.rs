//! ERC20 (USDT) contract bindings

use alloy::sol;

sol! {
    /// The subset of the ERC20 interface used for delegated transfers
    #[sol(rpc)]
    interface IERC20 {
        /// Returns the balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Returns the remaining allowance granted by an owner to a spender
        function allowance(address owner, address spender) external view returns (uint256);

        /// Moves tokens from a sender to a recipient using the caller's allowance
        function transferFrom(address sender, address recipient, uint256 amount) external returns (bool);
    }
}
