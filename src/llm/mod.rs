//! LLM backend abstraction.
//!
//! Two backends are supported: a local LM Studio-style server speaking the
//! OpenAI chat-completion protocol, and the Gemini API.  Both are normalized
//! behind `Provider::generate`, which takes one request shape and returns the
//! completion text, or `None` when the backend produced nothing usable.

use crate::config::Llm;
use crate::log_internal;

pub mod gemini;
pub mod lmstudio;

/// Which backend handles generation requests.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Provider {
    LmStudio,
    Gemini,
}

impl Provider {
    /// Resolve the `LLM_PROVIDER` selector, case-insensitively.  Unrecognized
    /// values fall back to LM Studio.
    pub fn from_selector(selector: &str) -> Self {
        match selector.to_ascii_lowercase().as_str() {
            "lmstudio" => Provider::LmStudio,
            "gemini" => Provider::Gemini,
            other => {
                log_internal!(
                    "Unrecognized LLM_PROVIDER `{}`; falling back to lmstudio",
                    other
                );
                Provider::LmStudio
            }
        }
    }

    /// Dispatch a request to the selected backend.  Each backend ignores the
    /// toggle it has no use for: LM Studio drops `grounding_enabled`, Gemini
    /// drops `thinking_enabled`.
    pub async fn generate(self, cfg: &Llm, request: &LlmRequest<'_>) -> Option<String> {
        match self {
            Provider::LmStudio => lmstudio::generate(cfg, request).await,
            Provider::Gemini => gemini::generate(cfg, request).await,
        }
    }
}

/// One generation request.  Built fresh per incoming message and not retained.
pub struct LlmRequest<'a> {
    pub prompt: &'a str,
    pub system_prompt: &'a str,
    pub history: &'a [ChatTurn],
    pub thinking_enabled: bool,
    pub grounding_enabled: bool,
}

#[allow(non_camel_case_types)] // Serialized literally; case matters
#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
pub enum Role {
    system,
    user,
    assistant,
}

/// One role-tagged message in a conversation.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_is_case_insensitive() {
        assert_eq!(Provider::from_selector("gemini"), Provider::Gemini);
        assert_eq!(Provider::from_selector("GEMINI"), Provider::Gemini);
        assert_eq!(Provider::from_selector("LmStudio"), Provider::LmStudio);
    }

    #[test]
    fn selector_resolution_is_idempotent() {
        for selector in ["lmstudio", "gemini", "something-else"] {
            assert_eq!(
                Provider::from_selector(selector),
                Provider::from_selector(selector)
            );
        }
    }

    #[test]
    fn unrecognized_selector_falls_back_to_lmstudio() {
        assert_eq!(Provider::from_selector("openai"), Provider::LmStudio);
        assert_eq!(Provider::from_selector(""), Provider::LmStudio);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let turn = ChatTurn::new(Role::assistant, "hi");
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["content"], "hi");
    }
}
