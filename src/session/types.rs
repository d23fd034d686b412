use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Who produced a turn.
///
/// The assistant is persisted as `"bot"`; `"assistant"` is accepted when
/// reading so stores written by either convention load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Role {
    #[serde(rename = "user")]
    #[strum(serialize = "user")]
    User,
    #[serde(rename = "bot", alias = "assistant")]
    #[strum(serialize = "bot")]
    Assistant,
}

impl Role {
    /// Speaker label used when a turn is rendered into a prompt.
    pub fn speaker_label(self) -> &'static str {
        match self {
            Self::User => "Usuário",
            Self::Assistant => "CryptoBrain",
        }
    }
}

/// One message of a conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    /// RFC 3339 creation time.
    #[serde(alias = "time")]
    pub timestamp: String,
}

impl Turn {
    pub fn now(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_role_serializes_as_bot() {
        let turn = Turn {
            role: Role::Assistant,
            text: "hello".into(),
            timestamp: "2025-01-01T00:00:00+00:00".into(),
        };
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "bot");
        assert_eq!(json["timestamp"], "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn assistant_alias_and_legacy_time_key_are_accepted() {
        let raw = r#"{"role":"assistant","text":"oi","time":"2025-01-01T00:00:00Z"}"#;
        let turn: Turn = serde_json::from_str(raw).unwrap();
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.timestamp, "2025-01-01T00:00:00Z");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let raw = r#"{"role":"system","text":"x","timestamp":"t"}"#;
        assert!(serde_json::from_str::<Turn>(raw).is_err());
    }

    #[test]
    fn role_display_matches_wire_name() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "bot");
    }

    #[test]
    fn turn_now_stamps_parseable_rfc3339() {
        let turn = Turn::now(Role::User, "hi");
        assert!(chrono::DateTime::parse_from_rfc3339(&turn.timestamp).is_ok());
    }
}
