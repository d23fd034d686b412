use super::types::CoinRecord;
use super::MarketData;
use crate::config::MarketConfig;
use crate::providers::http_client::build_provider_client_with_timeout;
use crate::providers::sanitize_api_error;
use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;

/// `/coins/markets` client. Any failure degrades to an empty list.
pub struct CoinGeckoClient {
    cached_markets_url: String,
    per_page: u32,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct MarketCoin {
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    market_cap: Option<f64>,
}

impl From<MarketCoin> for CoinRecord {
    fn from(coin: MarketCoin) -> Self {
        Self {
            name: coin.name,
            symbol: coin.symbol,
            price: coin.current_price,
            change: coin.price_change_percentage_24h,
            market_cap: coin.market_cap,
        }
    }
}

impl CoinGeckoClient {
    pub fn new(config: &MarketConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/');
        Self {
            cached_markets_url: format!("{base_url}/coins/markets"),
            per_page: config.per_page.max(1),
            client: build_provider_client_with_timeout(config.timeout_secs),
        }
    }

    async fn try_fetch(&self) -> anyhow::Result<Vec<CoinRecord>> {
        let per_page = self.per_page.to_string();
        let response = self
            .client
            .get(&self.cached_markets_url)
            .query(&[
                ("vs_currency", "usd"),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("price_change_percentage", "24h"),
            ])
            .send()
            .await
            .context("market data request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("market data API error ({status}): {}", sanitize_api_error(&body));
        }

        let coins: Vec<MarketCoin> = response
            .json()
            .await
            .context("market data JSON decode failed")?;
        Ok(coins.into_iter().map(CoinRecord::from).collect())
    }
}

impl MarketData for CoinGeckoClient {
    fn fetch_coins(&self) -> Pin<Box<dyn Future<Output = Vec<CoinRecord>> + Send + '_>> {
        Box::pin(async move {
            match self.try_fetch().await {
                Ok(coins) => {
                    tracing::debug!(count = coins.len(), "market data fetched");
                    coins
                }
                Err(error) => {
                    tracing::warn!("market data unavailable: {error:#}");
                    Vec::new()
                }
            }
        })
    }
}
