pub mod schema;

pub use schema::{
    Config, GatewayConfig, MarketConfig, MemoryBackend, MemoryConfig, ObservabilityConfig,
    ResponderConfig, ResponderMode,
};
