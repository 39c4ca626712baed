//! Contract bindings for the USDT token

pub mod usdt;

pub use usdt::*;
