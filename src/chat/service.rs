use crate::config::{Config, ResponderMode};
use crate::error::ChatError;
use crate::market::{CoinGeckoClient, MarketData, MarketSnapshot};
use crate::prompt::{SYSTEM_PROMPT, assemble};
use crate::providers::{self, Provider};
use crate::responder;
use crate::session::{self, SessionLocks, SessionStore, render_history};
use anyhow::Context;
use std::sync::Arc;

/// Session used when a request carries no (or a blank) session id.
pub const DEFAULT_SESSION_ID: &str = "default";
/// Recorded and returned when the provider answers with nothing usable.
pub const NO_ANSWER_PLACEHOLDER: &str = "Sem resposta.";

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model: String,
    pub temperature: f64,
    pub system_prompt: String,
    pub history_window: usize,
    pub mode: ResponderMode,
    pub cheap_threshold_usd: f64,
}

impl ChatSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model(),
            temperature: config.default_temperature,
            system_prompt: config
                .responder
                .system_prompt
                .clone()
                .filter(|prompt| !prompt.trim().is_empty())
                .unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
            history_window: config.memory.history_window,
            mode: config.responder.mode,
            cheap_threshold_usd: config.market.cheap_threshold_usd,
        }
    }
}

/// Request flow shared by the gateway and the CLI.
///
/// Each call holds the session's lock from the history read until both turns
/// are appended, so concurrent requests on one session never drop a turn.
pub struct ChatService {
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn Provider>,
    market: Arc<dyn MarketData>,
    locks: SessionLocks,
    settings: ChatSettings,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn Provider>,
        market: Arc<dyn MarketData>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            store,
            provider,
            market,
            locks: SessionLocks::new(),
            settings,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = session::create_session_store(config).context("create session store")?;
        let provider: Arc<dyn Provider> = Arc::from(
            providers::create_provider(
                config.provider_name(),
                config.api_key.as_deref(),
                config.responder.provider_timeout_secs,
            )
            .context("create completion provider")?,
        );
        let market: Arc<dyn MarketData> = Arc::new(CoinGeckoClient::new(&config.market));
        Ok(Self::new(
            store,
            provider,
            market,
            ChatSettings::from_config(config),
        ))
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Answer `question` in the context of `session_id` and record the exchange.
    ///
    /// On any failure the session is left untouched: both turns are stored or neither.
    pub async fn ask(
        &self,
        question: Option<&str>,
        session_id: Option<&str>,
    ) -> Result<String, ChatError> {
        // Blank means absent; anything else is used verbatim.
        let question = question
            .filter(|q| !q.trim().is_empty())
            .ok_or(ChatError::MissingQuestion)?;
        let session_id = session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(DEFAULT_SESSION_ID);

        let _guard = self.locks.acquire(session_id).await;
        let history = self.store.get(session_id);

        let answer = match self.settings.mode {
            ResponderMode::Llm => self.complete(question, &history).await?,
            ResponderMode::Rules => {
                let coins = self.market.fetch_coins().await;
                let snapshot =
                    MarketSnapshot::from_coins(&coins, self.settings.cheap_threshold_usd);
                responder::respond(&snapshot, question, &history)
            }
        };

        let (id, q, a) = (session_id.to_owned(), question.to_owned(), answer.clone());
        self.on_store(move |store| store.append_exchange(&id, &q, &a))
            .await
            .context("record exchange")
            .map_err(|error| {
                tracing::error!(session = session_id, "recording turns failed: {error:#}");
                ChatError::Processing(error)
            })?;

        tracing::debug!(
            session = session_id,
            mode = %self.settings.mode,
            history = history.len(),
            "chat answered"
        );
        Ok(answer)
    }

    /// Forget everything stored for `session_id`.
    pub async fn clear(&self, session_id: Option<&str>) -> Result<(), ChatError> {
        let session_id = session_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(ChatError::MissingSessionId)?;

        let _guard = self.locks.acquire(session_id).await;
        let id = session_id.to_owned();
        self.on_store(move |store| store.clear(&id))
            .await
            .map_err(|error| {
                tracing::error!(session = session_id, "session clear failed: {error:#}");
                ChatError::ClearFailed(error)
            })?;
        tracing::info!(session = session_id, "session cleared");
        Ok(())
    }

    async fn complete(
        &self,
        question: &str,
        history: &[session::Turn],
    ) -> Result<String, ChatError> {
        let history_text = render_history(history, self.settings.history_window);
        let messages = assemble(&self.settings.system_prompt, &history_text, question);

        let answer = self
            .provider
            .complete(&messages, &self.settings.model, self.settings.temperature)
            .await
            .map_err(|error| {
                tracing::error!(
                    provider = self.provider.name(),
                    "completion failed: {}",
                    providers::sanitize_api_error(&format!("{error:#}"))
                );
                ChatError::Processing(error)
            })?;

        if answer.trim().is_empty() {
            tracing::warn!(
                provider = self.provider.name(),
                "empty completion, using placeholder"
            );
            return Ok(NO_ANSWER_PLACEHOLDER.to_string());
        }
        Ok(answer)
    }

    /// Store mutations may write to disk, so they run on the blocking pool.
    async fn on_store<T, F>(&self, op: F) -> anyhow::Result<T>
    where
        F: FnOnce(&dyn SessionStore) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .context("session store task failed")?
    }
}
