use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::Level;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// "error" | "warn" | "info" | "debug" | "trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl ObservabilityConfig {
    /// Parsed log level, falling back to INFO for unrecognised values.
    pub fn level(&self) -> Level {
        Level::from_str(self.log_level.trim()).unwrap_or(Level::INFO)
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observability_config_default() {
        let o = ObservabilityConfig::default();
        assert_eq!(o.log_level, "info");
        assert_eq!(o.level(), Level::INFO);
    }

    #[test]
    fn level_parses_case_insensitively() {
        let o = ObservabilityConfig {
            log_level: "DEBUG".into(),
        };
        assert_eq!(o.level(), Level::DEBUG);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let o = ObservabilityConfig {
            log_level: "chatty".into(),
        };
        assert_eq!(o.level(), Level::INFO);
    }
}
