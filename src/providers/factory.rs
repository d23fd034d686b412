use super::compatible::OpenAiCompatibleProvider;
use super::http_client::build_provider_client_with_timeout;
use super::traits::Provider;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Whether `name` is a provider this crate can construct.
pub fn is_supported_provider(name: &str) -> bool {
    matches!(name, "groq" | "openai")
        || name
            .strip_prefix("custom:")
            .is_some_and(|url| !url.trim().is_empty())
}

/// Model used when the config leaves `default_model` unset.
pub fn default_model_for(name: &str) -> &'static str {
    match name {
        "openai" => "gpt-4o-mini",
        _ => "llama-3.3-70b-versatile",
    }
}

/// Resolve API key for a provider from config and environment variables.
///
/// Resolution order:
/// 1. Explicitly provided `api_key` parameter (trimmed, filtered if empty)
/// 2. Provider-specific environment variable (`GROQ_API_KEY`, `OPENAI_API_KEY`)
/// 3. Generic fallback variables (`CRYPTOBRAIN_API_KEY`, `API_KEY`)
pub fn resolve_api_key(name: &str, explicit_api_key: Option<&str>) -> Option<String> {
    if let Some(key) = explicit_api_key.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }

    let provider_env_candidates: &[&str] = match name {
        "groq" => &["GROQ_API_KEY"],
        "openai" => &["OPENAI_API_KEY"],
        _ => &[],
    };

    provider_env_candidates
        .iter()
        .chain(["CRYPTOBRAIN_API_KEY", "API_KEY"].iter())
        .find_map(|env_var| {
            std::env::var(env_var)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
}

pub fn create_provider(
    name: &str,
    api_key: Option<&str>,
    timeout_secs: u64,
) -> anyhow::Result<Box<dyn Provider>> {
    let resolved_key = resolve_api_key(name, api_key);
    let api_key = resolved_key.as_deref();
    let client = build_provider_client_with_timeout(timeout_secs);

    let provider = match name {
        "groq" => OpenAiCompatibleProvider::new("Groq", GROQ_BASE_URL, api_key, client),
        "openai" => OpenAiCompatibleProvider::new("OpenAI", OPENAI_BASE_URL, api_key, client),
        _ => {
            let Some(base_url) = name
                .strip_prefix("custom:")
                .map(str::trim)
                .filter(|url| !url.is_empty())
            else {
                anyhow::bail!(
                    "Unknown provider: {name}. Supported: groq, openai, custom:<base url>"
                );
            };
            OpenAiCompatibleProvider::new("Custom", base_url, api_key, client)
        }
    };

    if api_key.is_none() {
        tracing::warn!(
            provider = name,
            "no API key configured; completion requests will fail"
        );
    }
    tracing::debug!(provider = name, base_url = provider.base_url(), "provider created");

    Ok(Box::new(provider))
}
