//! Client for an LM Studio-style local inference server.
//!
//! Speaks the OpenAI chat-completion protocol: one POST to
//! `{base_url}/chat/completions` with the full message list, no streaming.

use super::{ChatTurn, LlmRequest, Role};
use crate::config::Llm;
use crate::log_internal;
use reqwest::StatusCode;

/// Directive appended to the user message when the caller does not want the
/// model's reasoning exposed.
const NO_THINK_SUFFIX: &str = " /no_think";
const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// The one case where this client produces user-facing text itself: the
/// server isn't reachable at all.
const CONNECT_FAILED: &str =
    "Could not connect to the local LM Studio server. Please ensure it is running.";

#[derive(serde::Serialize)]
struct ChatCompletionRequest {
    /// Model label; LM Studio serves whatever model is loaded regardless.
    model: String,
    messages: Vec<ChatTurn>,
    temperature: f32,
    /// -1 requests unlimited output length.
    max_tokens: i64,
    stream: bool,
}

#[derive(serde::Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(serde::Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(serde::Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub async fn generate(cfg: &Llm, request: &LlmRequest<'_>) -> Option<String> {
    let url = format!(
        "{}/chat/completions",
        cfg.lmstudio_url.trim_end_matches('/')
    );
    let body = ChatCompletionRequest {
        model: cfg.lmstudio_model.clone(),
        messages: build_messages(request),
        temperature: 0.7,
        max_tokens: -1,
        stream: false,
    };

    log_internal!("Sending request to LM Studio at {}... ", url);
    let client = reqwest::Client::new();
    let response = match client.post(&url).json(&body).send().await {
        Ok(response) => response,
        Err(e) if e.is_connect() => {
            log_internal!("Could not connect to LM Studio at {}: {}", url, e);
            return Some(CONNECT_FAILED.to_string());
        }
        Err(e) => {
            log_internal!("LM Studio request failed: {}", e);
            return None;
        }
    };

    if response.status() != StatusCode::OK {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log_internal!("LM Studio returned status {}: {}", status, body);
        return None;
    }

    let parsed: ChatCompletionResponse = match response.json().await {
        Ok(parsed) => parsed,
        Err(e) => {
            log_internal!("Could not parse LM Studio response: {}", e);
            return None;
        }
    };

    let content = match parsed.choices.into_iter().next() {
        Some(choice) => choice.message.content,
        None => {
            log_internal!("LM Studio response contained no choices");
            return None;
        }
    };

    log_internal!("Sending request to LM Studio at {}... done", url);

    let text = if request.thinking_enabled {
        content.trim().to_string()
    } else {
        strip_think_tags(&content)
    };
    Some(text)
}

/// Assemble the outgoing message list: system prompt first, history turns
/// verbatim, the new user prompt last.
fn build_messages(request: &LlmRequest<'_>) -> Vec<ChatTurn> {
    let mut messages = Vec::with_capacity(request.history.len() + 2);
    messages.push(ChatTurn::new(Role::system, request.system_prompt));
    messages.extend(request.history.iter().cloned());

    let content = if request.thinking_enabled {
        request.prompt.to_string()
    } else {
        format!("{}{}", request.prompt, NO_THINK_SUFFIX)
    };
    messages.push(ChatTurn::new(Role::user, content));
    messages
}

/// Remove the literal `<think>`/`</think>` markers, keeping the enclosed
/// text.  No balancing or nesting; just the two patterns.
fn strip_think_tags(text: &str) -> String {
    text.replace(THINK_OPEN, "")
        .replace(THINK_CLOSE, "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(history: &'a [ChatTurn], thinking: bool) -> LlmRequest<'a> {
        LlmRequest {
            prompt: "hello",
            system_prompt: "be terse",
            history,
            thinking_enabled: thinking,
            grounding_enabled: false,
        }
    }

    #[test]
    fn messages_are_system_history_then_user() {
        let history = vec![
            ChatTurn::new(Role::user, "earlier question"),
            ChatTurn::new(Role::assistant, "earlier answer"),
        ];
        let messages = build_messages(&request(&history, true));

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::system);
        assert_eq!(messages[0].content, "be terse");
        assert_eq!(messages[1].content, "earlier question");
        assert_eq!(messages[2].content, "earlier answer");
        assert_eq!(messages[3].role, Role::user);
        assert_eq!(messages[3].content, "hello");
    }

    #[test]
    fn thinking_disabled_appends_directive() {
        let messages = build_messages(&request(&[], false));
        assert_eq!(messages.last().unwrap().content, "hello /no_think");
    }

    #[test]
    fn thinking_enabled_leaves_prompt_alone() {
        let messages = build_messages(&request(&[], true));
        assert_eq!(messages.last().unwrap().content, "hello");
    }

    #[test]
    fn strip_removes_markers_but_keeps_text() {
        assert_eq!(
            strip_think_tags("<think>plan the reply</think> Hello there!"),
            "plan the reply Hello there!"
        );
    }

    #[test]
    fn strip_without_markers_is_a_trim() {
        assert_eq!(strip_think_tags("  plain answer \n"), "plain answer");
    }

    #[test]
    fn strip_handles_unpaired_markers() {
        assert_eq!(strip_think_tags("<think>half-open answer"), "half-open answer");
    }
}
