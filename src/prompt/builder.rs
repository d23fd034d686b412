use serde::Serialize;

/// Default persona instruction sent as the system message.
pub const SYSTEM_PROMPT: &str = "Você é a CryptoBrain IA — assistente especialista em criptomoedas.
Responda em português, em tom humano e direto:
- Sempre alerte sobre riscos
- Use bullets quando fizer listas
- Resuma: oportunidade + risco
";

const HISTORY_LABEL: &str = "Histórico resumido:\n";
const QUESTION_LABEL: &str = "Pergunta atual: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
}

impl PromptRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// Build the three-message prompt: instruction, labelled history, labelled question.
///
/// The order is significant to the completion provider and never changes.
/// Nothing is truncated here; callers bound the history through the window size.
pub fn assemble(system_prompt: &str, history_text: &str, question: &str) -> [PromptMessage; 3] {
    [
        PromptMessage::system(system_prompt),
        PromptMessage::user(format!("{HISTORY_LABEL}{history_text}")),
        PromptMessage::user(format!("{QUESTION_LABEL}{question}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_produces_fixed_role_order() {
        let messages = assemble(SYSTEM_PROMPT, "Usuário: oi", "qual o preço do BTC?");
        let roles: Vec<PromptRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![PromptRole::System, PromptRole::User, PromptRole::User]
        );
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].content, "Histórico resumido:\nUsuário: oi");
        assert_eq!(messages[2].content, "Pergunta atual: qual o preço do BTC?");
    }

    #[test]
    fn empty_history_still_yields_three_messages() {
        let messages = assemble(SYSTEM_PROMPT, "", "oi");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].content, "Histórico resumido:\n");
    }

    #[test]
    fn empty_question_still_yields_three_messages() {
        let messages = assemble("sys", "", "");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].content, "Pergunta atual: ");
    }

    #[test]
    fn long_history_is_not_truncated() {
        let history = "Usuário: x\n".repeat(500);
        let messages = assemble("sys", &history, "q");
        assert!(messages[1].content.ends_with(&history));
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_value(PromptMessage::system("s")).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(PromptRole::User.to_string(), "user");
        assert_eq!(PromptRole::User.as_str(), "user");
    }
}
