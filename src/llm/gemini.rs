//! Client for the Gemini API.
//!
//! One `models/{model}:generateContent` call per request, with the system
//! prompt carried as a system instruction and history translated into
//! Gemini's content format.  Unlike the LM Studio client, every failure here
//! is reported back as user-facing text with the error detail embedded.

use super::{LlmRequest, Role};
use crate::config::Llm;
use crate::log_internal;
use anyhow::{anyhow, bail, Result};
use reqwest::StatusCode;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const MISSING_KEY: &str =
    "The `GEMINI_API_KEY` is missing. Please ask the bot administrator to configure it.";

#[derive(serde::Serialize)]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(serde::Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(serde::Serialize)]
struct Part {
    text: String,
}

#[derive(serde::Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(serde::Serialize)]
struct GoogleSearch {}

#[derive(serde::Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(serde::Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

pub async fn generate(cfg: &Llm, request: &LlmRequest<'_>) -> Option<String> {
    // Precondition, checked before any network traffic.
    let Some(api_key) = cfg.gemini_api_key.as_deref().filter(|k| !k.is_empty()) else {
        log_internal!("GEMINI_API_KEY is not configured");
        return Some(MISSING_KEY.to_string());
    };

    log_internal!(
        "Sending request to Gemini (model {}, grounding {})... ",
        cfg.gemini_model,
        request.grounding_enabled,
    );

    match call(cfg, api_key, request).await {
        Ok(text) => {
            log_internal!("Sending request to Gemini (model {})... done", cfg.gemini_model);
            Some(text)
        }
        Err(e) => {
            log_internal!("Gemini request failed: {:#}", e);
            Some(format!(
                "An error occurred while contacting the Gemini API: {}",
                e
            ))
        }
    }
}

async fn call(cfg: &Llm, api_key: &str, request: &LlmRequest<'_>) -> Result<String> {
    let url = format!("{}/{}:generateContent", API_BASE, cfg.gemini_model);
    let body = build_request(request);

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        bail!("status {}: {}", status, body);
    }

    let parsed: GenerateContentResponse = response.json().await?;
    let text = parsed
        .candidates
        .first()
        .map(|candidate| {
            candidate
                .content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect::<String>()
        })
        .filter(|text| !text.is_empty())
        .ok_or_else(|| anyhow!("response contained no text"))?;

    Ok(text.trim().to_string())
}

fn build_request(request: &LlmRequest<'_>) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request
        .history
        .iter()
        .map(|turn| Content {
            role: Some(to_gemini_role(turn.role)),
            parts: vec![Part {
                text: turn.content.clone(),
            }],
        })
        .collect();
    contents.push(Content {
        role: Some("user"),
        parts: vec![Part {
            text: request.prompt.to_string(),
        }],
    });

    let tools = if request.grounding_enabled {
        vec![Tool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };

    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: request.system_prompt.to_string(),
            }],
        },
        contents,
        tools,
    }
}

/// Gemini labels the assistant side of a conversation "model".
fn to_gemini_role(role: Role) -> &'static str {
    match role {
        Role::assistant => "model",
        _ => "user",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatTurn;

    fn request<'a>(history: &'a [ChatTurn], grounding: bool) -> LlmRequest<'a> {
        LlmRequest {
            prompt: "what's new?",
            system_prompt: "be helpful",
            history,
            thinking_enabled: false,
            grounding_enabled: grounding,
        }
    }

    #[test]
    fn assistant_turns_map_to_model_role() {
        let history = vec![
            ChatTurn::new(Role::user, "hi"),
            ChatTurn::new(Role::assistant, "hello"),
        ];
        let value = serde_json::to_value(build_request(&request(&history, false))).unwrap();

        let contents = value["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "hello");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "what's new?");
    }

    #[test]
    fn system_prompt_travels_as_system_instruction() {
        let value = serde_json::to_value(build_request(&request(&[], false))).unwrap();
        assert_eq!(
            value["system_instruction"]["parts"][0]["text"],
            "be helpful"
        );
        assert!(value["system_instruction"].get("role").is_none());
    }

    #[test]
    fn search_tool_attached_only_when_grounding() {
        let grounded = serde_json::to_value(build_request(&request(&[], true))).unwrap();
        assert!(grounded["tools"][0].get("google_search").is_some());

        let plain = serde_json::to_value(build_request(&request(&[], false))).unwrap();
        assert!(plain.get("tools").is_none());
    }
}
