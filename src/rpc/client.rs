use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::RpcSettings;
use crate::error::FetchError;
use crate::rpc::types::{
    HolderBalance, LargestAccount, RpcResponse, TokenAmount, TokenMetrics, WithContext,
};
use crate::utils::amount_to_f64;

/// Minimal Solana JSON-RPC client for the two read-only calls the tracker
/// needs. One attempt per call; the only resilience is the request timeout
/// from [`RpcSettings`].
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    request_id: AtomicU64,
}

impl RpcClient {
    pub fn new(settings: &RpcSettings) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { http, url: settings.url.clone(), request_id: AtomicU64::new(1) })
    }

    /// Issue one JSON-RPC call and decode its `result` field.
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, FetchError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": self.request_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        parse_response(body)
    }

    pub async fn get_token_supply(
        &self,
        mint: &str,
    ) -> Result<WithContext<TokenAmount>, FetchError> {
        let params = json!([mint, { "commitment": "confirmed" }]);
        self.call("getTokenSupply", params).await
    }

    /// Up to 20 largest token accounts for the mint, largest first.
    pub async fn get_token_largest_accounts(
        &self,
        mint: &str,
    ) -> Result<WithContext<Vec<LargestAccount>>, FetchError> {
        let params = json!([mint, { "commitment": "confirmed" }]);
        self.call("getTokenLargestAccounts", params).await
    }

    /// Fetch everything one snapshot needs: total supply plus the largest
    /// holder balances, validated and converted to UI units.
    pub async fn fetch_token_metrics(&self, mint: &str) -> Result<TokenMetrics, FetchError> {
        let supply = self.get_token_supply(mint).await?;
        let largest = self.get_token_largest_accounts(mint).await?;

        metrics_from_responses(supply, largest)
    }
}

/// Decode a raw response body into the typed `result`, surfacing RPC error
/// envelopes and shape mismatches as [`FetchError`].
fn parse_response<T: DeserializeOwned>(body: Value) -> Result<T, FetchError> {
    let response: RpcResponse<T> =
        serde_json::from_value(body).map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    response.into_result()
}

/// Convert the two wire responses into validated UI-unit metrics.
fn metrics_from_responses(
    supply: WithContext<TokenAmount>,
    largest: WithContext<Vec<LargestAccount>>,
) -> Result<TokenMetrics, FetchError> {
    let decimals = supply.value.decimals;
    let total = amount_to_f64(&supply.value.amount, decimals).ok_or_else(|| {
        FetchError::MalformedResponse(format!(
            "unparseable supply amount '{}'",
            supply.value.amount
        ))
    })?;

    let mut holders = Vec::with_capacity(largest.value.len());
    for account in &largest.value {
        let balance = amount_to_f64(&account.amount, account.decimals).ok_or_else(|| {
            FetchError::MalformedResponse(format!(
                "unparseable balance '{}' for account {}",
                account.amount, account.address
            ))
        })?;
        holders.push(HolderBalance { address: account.address.clone(), balance });
    }

    // Downstream concentration metrics index into largest-first order
    holders.sort_by(|a, b| b.balance.total_cmp(&a.balance));

    Ok(TokenMetrics { slot: supply.context.slot, supply: total, decimals, holders })
}
