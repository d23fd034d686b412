pub mod service;

pub use service::{ChatService, ChatSettings, DEFAULT_SESSION_ID, NO_ANSWER_PLACEHOLDER};
