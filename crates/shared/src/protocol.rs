//! Wire types for the swap-aggregation API.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const QUOTE_PROTOCOLS: [&str; 4] = ["soroswap", "phoenix", "aqua", "sdex"];
pub const SLIPPAGE_TOLERANCE_BPS: u32 = 50;
pub const PLATFORM_FEE_BPS: u32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetListResponse {
    pub assets: Vec<AssetEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetEntry {
    #[serde(default)]
    pub contract: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimals")]
    pub decimals: Option<u32>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    ExactIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrustlinePolicy {
    Create,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub asset_in: String,
    pub asset_out: String,
    pub amount: u128,
    pub trade_type: TradeType,
    pub protocols: Vec<String>,
    pub slippage_tolerance: u32,
    pub gasless_trustline: TrustlinePolicy,
    pub fee_bps: u32,
}

impl QuoteRequest {
    /// Exact-input request with the fixed protocol set, slippage, trustline and fee policy.
    pub fn exact_in(asset_in: impl Into<String>, asset_out: impl Into<String>, amount: u128) -> Self {
        Self {
            asset_in: asset_in.into(),
            asset_out: asset_out.into(),
            amount,
            trade_type: TradeType::ExactIn,
            protocols: QUOTE_PROTOCOLS.iter().map(|p| p.to_string()).collect(),
            slippage_tolerance: SLIPPAGE_TOLERANCE_BPS,
            gasless_trustline: TrustlinePolicy::Create,
            fee_bps: PLATFORM_FEE_BPS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub amount_out: String,
    #[serde(deserialize_with = "string_or_number")]
    pub other_amount_threshold: String,
    #[serde(deserialize_with = "string_or_number")]
    pub price_impact_pct: String,
    #[serde(deserialize_with = "string_or_number")]
    pub platform: String,
    /// Fields the client does not interpret, kept for display and diagnostics.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn lenient_decimals<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}
