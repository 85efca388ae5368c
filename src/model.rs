//! Asset records and feed snapshots.
//!
//! The feed delivers numeric fields as strings (`"priceUsd": "0.25"`), so the
//! record keeps them as text and parses on demand. A field that fails to parse
//! becomes `NaN`; that value flows into sorting and display unchanged rather
//! than being rejected per record.

use serde::Deserialize;

/// One cryptocurrency's fields for a given update.
///
/// `name` is the display key for the table; the feed does not guarantee it is
/// unique. Unknown fields in the payload are ignored, missing ones default to
/// the empty string (which parses to `NaN` downstream).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub price_usd: String,
    #[serde(default)]
    pub change_percent24_hr: String,
}

impl Asset {
    /// Current USD price as a float, `NaN` if unparsable.
    pub fn price_usd_f64(&self) -> f64 {
        parse_decimal(&self.price_usd)
    }

    /// 24h change percentage as a float, `NaN` if unparsable.
    pub fn change_percent_f64(&self) -> f64 {
        parse_decimal(&self.change_percent24_hr)
    }
}

/// Wire envelope for one feed event: `{ "data": [Asset, ...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedPayload {
    pub data: Vec<Asset>,
}

/// One full dataset as received from the feed, with receipt time.
///
/// Snapshots are wholesale replacements; there is no merging across messages.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSnapshot {
    /// Receipt time, seconds since epoch.
    pub timestamp: i64,
    pub assets: Vec<Asset>,
}

impl AssetSnapshot {
    /// Wraps a decoded payload with the current receipt time.
    pub fn now(assets: Vec<Asset>) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp(),
            assets,
        }
    }
}

/// Parses a string-encoded decimal, yielding `NaN` for anything unparsable.
pub fn parse_decimal(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}

/// Formats a parsed decimal to the fixed 5-decimal display form.
pub fn format_decimal(value: f64) -> String {
    format!("{:.5}", value)
}
