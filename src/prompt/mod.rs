pub mod builder;

pub use builder::{PromptMessage, PromptRole, SYSTEM_PROMPT, assemble};
