use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// CoinGecko-compatible API root
    #[serde(default = "default_market_base_url")]
    pub base_url: String,
    /// Coins requested per snapshot, in market-cap order
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Coins priced below this (USD) count as cheap
    #[serde(default = "default_cheap_threshold_usd")]
    pub cheap_threshold_usd: f64,
    #[serde(default = "default_market_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_market_base_url() -> String {
    "https://api.coingecko.com/api/v3".into()
}

fn default_per_page() -> u32 {
    50
}

fn default_cheap_threshold_usd() -> f64 {
    1.0
}

fn default_market_timeout_secs() -> u64 {
    15
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: default_market_base_url(),
            per_page: default_per_page(),
            cheap_threshold_usd: default_cheap_threshold_usd(),
            timeout_secs: default_market_timeout_secs(),
        }
    }
}
