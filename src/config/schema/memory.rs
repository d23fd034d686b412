use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MemoryBackend {
    /// One JSON document on disk, rewritten on every mutation.
    #[default]
    File,
    /// Process memory, lost on restart.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default)]
    pub backend: MemoryBackend,
    /// Session file for the `file` backend, relative to the workspace unless absolute
    #[serde(default = "default_memory_path")]
    pub path: String,
    /// Turns kept per session by the `memory` backend
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// Recent turns rendered into each prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_memory_path() -> String {
    "memory/sessions.json".into()
}

fn default_max_turns() -> usize {
    crate::session::store::DEFAULT_MAX_TURNS
}

fn default_history_window() -> usize {
    crate::session::window::DEFAULT_HISTORY_WINDOW
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            backend: MemoryBackend::default(),
            path: default_memory_path(),
            max_turns: default_max_turns(),
            history_window: default_history_window(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_memory_config() {
        let config = MemoryConfig::default();
        assert_eq!(config.backend, MemoryBackend::File);
        assert_eq!(config.path, "memory/sessions.json");
        assert_eq!(config.max_turns, 40);
        assert_eq!(config.history_window, 8);
    }

    #[test]
    fn backend_serde_variants() {
        let cases = [
            (MemoryBackend::File, "\"file\""),
            (MemoryBackend::Memory, "\"memory\""),
        ];

        for (backend, expected_json) in cases {
            assert_eq!(serde_json::to_string(&backend).unwrap(), expected_json);
            let decoded: MemoryBackend = serde_json::from_str(expected_json).unwrap();
            assert_eq!(decoded, backend);
        }
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(toml::from_str::<MemoryConfig>("backend = \"redis\"").is_err());
    }
}
