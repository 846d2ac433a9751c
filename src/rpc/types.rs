use serde::Deserialize;

use crate::error::FetchError;

/// JSON-RPC 2.0 response envelope.
///
/// Exactly one of `result` / `error` is expected; a response carrying
/// neither is malformed.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

impl<T> RpcResponse<T> {
    pub fn into_result(self) -> Result<T, FetchError> {
        if let Some(err) = self.error {
            return Err(FetchError::Rpc { code: err.code, message: err.message });
        }
        self.result.ok_or_else(|| {
            FetchError::MalformedResponse("response carries neither result nor error".to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Slot-stamped wrapper used by account-scoped RPC methods.
#[derive(Debug, Deserialize)]
pub struct WithContext<T> {
    pub context: RpcContext,
    pub value: T,
}

#[derive(Debug, Deserialize)]
pub struct RpcContext {
    pub slot: u64,
}

/// Token amount as returned by `getTokenSupply`.
///
/// `amount` is the raw base-unit value as a decimal string; the ui fields
/// are endpoint conveniences that lose precision for large supplies, so
/// conversion always starts from `amount`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    pub amount: String,
    pub decimals: u8,
    pub ui_amount: Option<f64>,
    #[serde(default)]
    pub ui_amount_string: String,
}

/// One entry from `getTokenLargestAccounts`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LargestAccount {
    pub address: String,
    pub amount: String,
    pub decimals: u8,
    pub ui_amount: Option<f64>,
    #[serde(default)]
    pub ui_amount_string: String,
}

/// Validated per-run fetch result, converted to UI units.
///
/// `slot` comes from the supply response context (the two calls may land a
/// slot or two apart; the supply slot stamps the run). `holders` is ordered
/// largest-first.
#[derive(Debug, Clone)]
pub struct TokenMetrics {
    pub slot: u64,
    pub supply: f64,
    pub decimals: u8,
    pub holders: Vec<HolderBalance>,
}

#[derive(Debug, Clone)]
pub struct HolderBalance {
    pub address: String,
    pub balance: f64,
}

impl TokenMetrics {
    /// Balance of the single largest account, 0 when none were returned.
    pub fn top_holder_balance(&self) -> f64 {
        self.holders.first().map(|h| h.balance).unwrap_or(0.0)
    }

    /// Combined balance of the ten largest accounts.
    pub fn top10_balance(&self) -> f64 {
        self.holders.iter().take(10).map(|h| h.balance).sum()
    }
}
