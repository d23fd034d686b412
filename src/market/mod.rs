pub mod coingecko;
pub mod types;

pub use coingecko::CoinGeckoClient;
pub use types::{CoinRecord, MarketSnapshot};

use std::future::Future;
use std::pin::Pin;

/// Source of market-cap ordered coin records.
///
/// Implementations never fail: an unreachable source yields an empty list.
pub trait MarketData: Send + Sync {
    fn fetch_coins(&self) -> Pin<Box<dyn Future<Output = Vec<CoinRecord>> + Send + '_>>;
}

/// Fixed coin list, for offline use and tests.
pub struct StaticMarketData {
    coins: Vec<CoinRecord>,
}

impl StaticMarketData {
    pub fn new(coins: Vec<CoinRecord>) -> Self {
        Self { coins }
    }
}

impl MarketData for StaticMarketData {
    fn fetch_coins(&self) -> Pin<Box<dyn Future<Output = Vec<CoinRecord>> + Send + '_>> {
        Box::pin(async move { self.coins.clone() })
    }
}
