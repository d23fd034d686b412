use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResponderMode {
    /// Forward the assembled prompt to the completion provider.
    #[default]
    Llm,
    /// Answer from market data with canned templates, no provider call.
    Rules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderConfig {
    #[serde(default)]
    pub mode: ResponderMode,
    /// Replaces the built-in persona instruction when set
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Completion request timeout
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
}

fn default_provider_timeout_secs() -> u64 {
    60
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            mode: ResponderMode::default(),
            system_prompt: None,
            provider_timeout_secs: default_provider_timeout_secs(),
        }
    }
}
