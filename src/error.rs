use thiserror::Error;

// ─── Chat boundary errors ────────────────────────────────────────────────────

/// Errors surfaced across the chat boundary (gateway, CLI).
///
/// Each variant carries a stable machine-readable [`code`](ChatError::code)
/// and a short user-facing message. Internal detail stays in the `Processing`
/// source chain and is only ever logged.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("question is missing")]
    MissingQuestion,

    #[error("session id is missing")]
    MissingSessionId,

    #[error("request body is invalid: {0}")]
    InvalidBody(String),

    #[error("processing failed: {0:#}")]
    Processing(#[source] anyhow::Error),

    #[error("clearing session failed: {0:#}")]
    ClearFailed(#[source] anyhow::Error),
}

impl ChatError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingQuestion => "missing_question",
            Self::MissingSessionId => "missing_session_id",
            Self::InvalidBody(_) => "invalid_body",
            Self::Processing(_) => "processing_failed",
            Self::ClearFailed(_) => "clear_failed",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingQuestion => "Envie 'question' no corpo da requisição.",
            Self::MissingSessionId => "Envie sessionId",
            Self::InvalidBody(_) => "Corpo da requisição inválido.",
            Self::Processing(_) => "Erro no processamento.",
            Self::ClearFailed(_) => "Erro ao limpar sessão",
        }
    }

    /// Validation errors are the caller's fault; everything else is ours.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingQuestion | Self::MissingSessionId | Self::InvalidBody(_)
        )
    }
}

// ─── Provider errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} API key not set")]
    MissingApiKey { provider: String },

    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("{provider} response could not be decoded: {message}")]
    Decode { provider: String, message: String },
}

// ─── Session store errors ───────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("session store serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}
