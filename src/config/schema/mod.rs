mod gateway;
mod market;
mod memory;
mod observability;
mod responder;

pub use gateway::GatewayConfig;
pub use market::MarketConfig;
pub use memory::{MemoryBackend, MemoryConfig};
pub use observability::ObservabilityConfig;
pub use responder::{ResponderConfig, ResponderMode};

use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory - computed from home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    pub api_key: Option<String>,
    /// "groq" | "openai" | "custom:<base url>"
    pub default_provider: Option<String>,
    /// Falls back to the provider's default model when unset
    pub default_model: Option<String>,
    pub default_temperature: f64,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub responder: ResponderConfig,

    #[serde(default)]
    pub market: MarketConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
        let cryptobrain_dir = home.join(".cryptobrain");

        Self {
            workspace_dir: cryptobrain_dir.join("workspace"),
            config_path: cryptobrain_dir.join("config.toml"),
            api_key: None,
            default_provider: Some("groq".to_string()),
            default_model: None,
            default_temperature: 0.7,
            gateway: GatewayConfig::default(),
            memory: MemoryConfig::default(),
            responder: ResponderConfig::default(),
            market: MarketConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let cryptobrain_dir = home.join(".cryptobrain");
        let config_path = cryptobrain_dir.join("config.toml");

        if !cryptobrain_dir.exists() {
            fs::create_dir_all(&cryptobrain_dir)
                .context("Failed to create .cryptobrain directory")?;
            fs::create_dir_all(cryptobrain_dir.join("workspace"))
                .context("Failed to create workspace directory")?;
        }

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            // Set computed paths that are skipped during serialization
            config.config_path.clone_from(&config_path);
            config.workspace_dir = cryptobrain_dir.join("workspace");
            config
        } else {
            let config = Self {
                config_path: config_path.clone(),
                workspace_dir: cryptobrain_dir.join("workspace"),
                ..Self::default()
            };
            config.save()?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        // API Key: CRYPTOBRAIN_API_KEY or API_KEY
        if let Ok(key) = std::env::var("CRYPTOBRAIN_API_KEY").or_else(|_| std::env::var("API_KEY"))
            && !key.is_empty()
        {
            self.api_key = Some(key);
        }

        // Provider: CRYPTOBRAIN_PROVIDER
        if let Ok(provider) = std::env::var("CRYPTOBRAIN_PROVIDER")
            && !provider.is_empty()
        {
            self.default_provider = Some(provider);
        }

        // Model: CRYPTOBRAIN_MODEL
        if let Ok(model) = std::env::var("CRYPTOBRAIN_MODEL")
            && !model.is_empty()
        {
            self.default_model = Some(model);
        }

        // Gateway port: CRYPTOBRAIN_GATEWAY_PORT or PORT
        if let Ok(port_str) =
            std::env::var("CRYPTOBRAIN_GATEWAY_PORT").or_else(|_| std::env::var("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        // Gateway host: CRYPTOBRAIN_GATEWAY_HOST or HOST
        if let Ok(host) =
            std::env::var("CRYPTOBRAIN_GATEWAY_HOST").or_else(|_| std::env::var("HOST"))
            && !host.is_empty()
        {
            self.gateway.host = host;
        }

        // Temperature: CRYPTOBRAIN_TEMPERATURE
        if let Ok(temp_str) = std::env::var("CRYPTOBRAIN_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.default_temperature = temp;
        }

        // Memory backend: CRYPTOBRAIN_MEMORY_BACKEND
        if let Ok(backend) = std::env::var("CRYPTOBRAIN_MEMORY_BACKEND") {
            match backend.trim().to_ascii_lowercase().as_str() {
                "file" => self.memory.backend = MemoryBackend::File,
                "memory" => self.memory.backend = MemoryBackend::Memory,
                "" => {}
                other => {
                    tracing::warn!(backend = other, "ignoring unknown memory backend override");
                }
            }
        }

        // Responder mode: CRYPTOBRAIN_RESPONDER_MODE
        if let Ok(mode) = std::env::var("CRYPTOBRAIN_RESPONDER_MODE") {
            match mode.trim().to_ascii_lowercase().as_str() {
                "llm" => self.responder.mode = ResponderMode::Llm,
                "rules" => self.responder.mode = ResponderMode::Rules,
                "" => {}
                other => tracing::warn!(mode = other, "ignoring unknown responder mode override"),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let provider = self.provider_name();
        if !crate::providers::is_supported_provider(provider) {
            anyhow::bail!(
                "Unsupported provider `{provider}`. Use groq, openai or custom:<base url>."
            );
        }
        if self.memory.max_turns == 0 {
            anyhow::bail!("[memory] max_turns must be at least 1");
        }
        if !(0.0..=2.0).contains(&self.default_temperature) {
            anyhow::bail!(
                "default_temperature must be between 0.0 and 2.0 (got {})",
                self.default_temperature
            );
        }
        Ok(())
    }

    pub fn provider_name(&self) -> &str {
        self.default_provider.as_deref().unwrap_or("groq")
    }

    /// Configured model, or the provider's default.
    pub fn model(&self) -> String {
        self.default_model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                crate::providers::default_model_for(self.provider_name()).to_string()
            })
    }

    /// Session file for the `file` backend with `~` expanded and relative
    /// paths anchored at the workspace.
    pub fn memory_path(&self) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(&self.memory.path).as_ref());
        if expanded.is_absolute() {
            expanded
        } else {
            self.workspace_dir.join(expanded)
        }
    }

    pub fn static_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.gateway.static_dir).as_ref())
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
