use serde::{Deserialize, Serialize};

/// Coins per snapshot list kept for the "top of market" view.
pub const TOP_COINS: usize = 10;

const STABLECOIN_SYMBOLS: [&str; 11] = [
    "usdt", "usdc", "dai", "busd", "tusd", "fdusd", "usde", "usdd", "pyusd", "usdp", "gusd",
];

/// One coin as seen by the responder. Prices in USD, change in 24h percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

impl CoinRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_change(mut self, change: f64) -> Self {
        self.change = Some(change);
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn is_stablecoin(&self) -> bool {
        let symbol = self.symbol.to_ascii_lowercase();
        STABLECOIN_SYMBOLS.contains(&symbol.as_str())
    }
}

/// Non-finite or absent numbers read as zero.
pub fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Pre-sorted market views consumed by the rule-based responder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketSnapshot {
    /// Largest coins, market-cap order.
    pub top: Vec<CoinRecord>,
    /// Non-stablecoins under the cheap threshold, market-cap order.
    pub cheap: Vec<CoinRecord>,
    /// Coins with positive 24h change, biggest gain first.
    pub rising: Vec<CoinRecord>,
}

impl MarketSnapshot {
    /// Derive the views from a market-cap ordered coin list.
    pub fn from_coins(coins: &[CoinRecord], cheap_threshold_usd: f64) -> Self {
        let top = coins.iter().take(TOP_COINS).cloned().collect();

        let cheap = coins
            .iter()
            .filter(|coin| !coin.is_stablecoin())
            .filter(|coin| {
                coin.price
                    .is_some_and(|price| price.is_finite() && price < cheap_threshold_usd)
            })
            .cloned()
            .collect();

        let mut rising: Vec<CoinRecord> = coins
            .iter()
            .filter(|coin| finite_or_zero(coin.change) > 0.0)
            .cloned()
            .collect();
        rising.sort_by(|a, b| finite_or_zero(b.change).total_cmp(&finite_or_zero(a.change)));

        Self { top, cheap, rising }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.cheap.is_empty() && self.rising.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins() -> Vec<CoinRecord> {
        vec![
            CoinRecord::new("Bitcoin").with_symbol("btc").with_price(60_000.0).with_change(1.2),
            CoinRecord::new("Tether").with_symbol("usdt").with_price(0.999).with_change(0.01),
            CoinRecord::new("Cardano").with_symbol("ada").with_price(0.45).with_change(5.5),
            CoinRecord::new("Dogecoin").with_symbol("doge").with_price(0.12).with_change(-3.0),
            CoinRecord::new("Mystery").with_symbol("mys"),
        ]
    }

    #[test]
    fn cheap_excludes_stablecoins_and_unpriced() {
        let snapshot = MarketSnapshot::from_coins(&coins(), 1.0);
        let names: Vec<&str> = snapshot.cheap.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Cardano", "Dogecoin"]);
    }

    #[test]
    fn rising_is_sorted_by_change_descending() {
        let snapshot = MarketSnapshot::from_coins(&coins(), 1.0);
        let names: Vec<&str> = snapshot.rising.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Cardano", "Bitcoin", "Tether"]);
    }

    #[test]
    fn top_keeps_market_cap_order_and_caps_at_ten() {
        let many: Vec<CoinRecord> = (0..15).map(|i| CoinRecord::new(format!("c{i}"))).collect();
        let snapshot = MarketSnapshot::from_coins(&many, 1.0);
        assert_eq!(snapshot.top.len(), TOP_COINS);
        assert_eq!(snapshot.top[0].name, "c0");
    }

    #[test]
    fn empty_input_gives_empty_snapshot() {
        assert!(MarketSnapshot::from_coins(&[], 1.0).is_empty());
    }

    #[test]
    fn finite_or_zero_handles_nan_and_none() {
        assert!((finite_or_zero(None)).abs() < f64::EPSILON);
        assert!((finite_or_zero(Some(f64::NAN))).abs() < f64::EPSILON);
        assert!((finite_or_zero(Some(2.5)) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn stablecoin_check_is_case_insensitive() {
        assert!(CoinRecord::new("USD Coin").with_symbol("USDC").is_stablecoin());
        assert!(!CoinRecord::new("Solana").with_symbol("sol").is_stablecoin());
    }
}
