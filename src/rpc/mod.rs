//! Solana JSON-RPC access.
//!
//! A thin HTTP client for the two read-only calls the tracker issues per
//! run (`getTokenSupply`, `getTokenLargestAccounts`) plus the wire types
//! and the validated [`TokenMetrics`] domain value built from them.

mod client;
mod types;

pub use client::RpcClient;
pub use types::{HolderBalance, LargestAccount, RpcContext, TokenAmount, TokenMetrics, WithContext};
