use crate::prompt::PromptMessage;
use std::future::Future;
use std::pin::Pin;

/// A chat-completion backend.
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "Groq", "OpenAI").
    fn name(&self) -> &str;

    /// Send an ordered, role-tagged message list and return the generated text.
    ///
    /// An empty string means the provider answered without usable content;
    /// transport, status and decode failures are errors.
    fn complete<'a>(
        &'a self,
        messages: &'a [PromptMessage],
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}
