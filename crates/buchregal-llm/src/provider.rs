//! Blurb providers
//!
//! The completion service is opaque: it takes a conversation and returns
//! a JSON-shaped string. [`ChatCompletionsClient`] speaks the common
//! chat-completions wire shape; [`ScriptedBlurbs`] answers from a script
//! for tests and offline use.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::prompt::build_blurb_prompt;
use crate::types::{BlurbRequest, BlurbResponse, LlmError, Message};

/// Something that can write a blurb for a book.
pub trait BlurbProvider {
    fn generate(
        &self,
        request: &BlurbRequest,
    ) -> impl Future<Output = Result<BlurbResponse, LlmError>> + Send;
}

// ============================================================================
// Chat-completions wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// ============================================================================
// HTTP-backed provider
// ============================================================================

pub struct ChatCompletionsClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatCompletionsClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client reading the API key from the given environment variable.
    pub fn from_env(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        env_var: &str,
    ) -> Result<Self, LlmError> {
        let api_key = std::env::var(env_var).map_err(|_| LlmError::MissingApiKey {
            env_var: env_var.to_string(),
        })?;
        Ok(Self::new(endpoint, model, api_key))
    }

    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: 0.7,
            max_tokens: 400,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            return Err(LlmError::RateLimited);
        }
        if !(200..300).contains(&status) {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, message });
        }

        let completion: CompletionResponse =
            response.json().await.map_err(|e| LlmError::Parse {
                message: e.to_string(),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyCompletion)
    }
}

impl BlurbProvider for ChatCompletionsClient {
    async fn generate(&self, request: &BlurbRequest) -> Result<BlurbResponse, LlmError> {
        let messages = build_blurb_prompt(request);
        let content = self.complete(&messages).await?;
        parse_blurb_payload(&content)
    }
}

// ============================================================================
// Payload parsing
// ============================================================================

/// Parse the JSON-shaped completion content.
///
/// Models wrap the object in markdown fences or chat filler often enough
/// that this peels fences, then falls back to the outermost brace pair,
/// then takes the whole text as the blurb.
pub fn parse_blurb_payload(content: &str) -> Result<BlurbResponse, LlmError> {
    let text = strip_fences(content).trim().to_string();
    if text.is_empty() {
        return Err(LlmError::EmptyCompletion);
    }

    if let Ok(response) = serde_json::from_str::<BlurbResponse>(&text) {
        return check_blurb(response);
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Ok(response) = serde_json::from_str::<BlurbResponse>(&text[start..=end]) {
                return check_blurb(response);
            }
        }
    }

    Ok(BlurbResponse {
        blurb: text,
        keywords: Vec::new(),
    })
}

fn check_blurb(response: BlurbResponse) -> Result<BlurbResponse, LlmError> {
    if response.blurb.trim().is_empty() {
        return Err(LlmError::EmptyCompletion);
    }
    Ok(response)
}

fn strip_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") after the opening fence.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest)
}

// ============================================================================
// Scripted provider for tests and offline use
// ============================================================================

#[derive(Default)]
pub struct ScriptedBlurbs {
    canned: Mutex<HashMap<String, BlurbResponse>>,
    failing: Mutex<HashSet<String>>,
}

impl ScriptedBlurbs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `title` with a fixed blurb.
    pub fn with_response(self, title: &str, blurb: &str) -> Self {
        self.canned.lock().unwrap().insert(
            title.to_string(),
            BlurbResponse {
                blurb: blurb.to_string(),
                keywords: Vec::new(),
            },
        );
        self
    }

    /// Fail requests for `title` with an API error.
    pub fn failing_for(self, title: &str) -> Self {
        self.failing.lock().unwrap().insert(title.to_string());
        self
    }
}

impl BlurbProvider for ScriptedBlurbs {
    async fn generate(&self, request: &BlurbRequest) -> Result<BlurbResponse, LlmError> {
        if self.failing.lock().unwrap().contains(&request.title) {
            return Err(LlmError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }
        if let Some(response) = self.canned.lock().unwrap().get(&request.title) {
            return Ok(response.clone());
        }
        Ok(BlurbResponse {
            blurb: format!(
                "Kurzbeschreibung zu \"{}\" von {}.",
                request.title, request.author
            ),
            keywords: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let response =
            parse_blurb_payload(r#"{"blurb": "Ein Wald voller Magie.", "keywords": ["Magie"]}"#)
                .unwrap();
        assert_eq!(response.blurb, "Ein Wald voller Magie.");
        assert_eq!(response.keywords, vec!["Magie".to_string()]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let content = "```json\n{\"blurb\": \"Ein Wald voller Magie.\"}\n```";
        let response = parse_blurb_payload(content).unwrap();
        assert_eq!(response.blurb, "Ein Wald voller Magie.");
        assert!(response.keywords.is_empty());
    }

    #[test]
    fn test_parse_json_with_chat_filler() {
        let content = "Gerne! Hier ist der Klappentext:\n{\"blurb\": \"Ein Wald voller Magie.\"}";
        let response = parse_blurb_payload(content).unwrap();
        assert_eq!(response.blurb, "Ein Wald voller Magie.");
    }

    #[test]
    fn test_plain_text_falls_back_to_blurb() {
        let response = parse_blurb_payload("Ein Wald voller Magie.").unwrap();
        assert_eq!(response.blurb, "Ein Wald voller Magie.");
    }

    #[test]
    fn test_empty_content() {
        assert!(matches!(
            parse_blurb_payload("   "),
            Err(LlmError::EmptyCompletion)
        ));
        assert!(matches!(
            parse_blurb_payload(r#"{"blurb": ""}"#),
            Err(LlmError::EmptyCompletion)
        ));
    }

    #[tokio::test]
    async fn test_scripted_provider() {
        let provider = ScriptedBlurbs::new()
            .with_response("Uprooted", "Ein Wald voller Magie.")
            .failing_for("Der Distelfink");

        let ok = provider
            .generate(&BlurbRequest::new("Uprooted", "Naomi Novik"))
            .await
            .unwrap();
        assert_eq!(ok.blurb, "Ein Wald voller Magie.");

        let err = provider
            .generate(&BlurbRequest::new("Der Distelfink", "Donna Tartt"))
            .await;
        assert!(err.is_err());

        let default = provider
            .generate(&BlurbRequest::new("Circe", "Madeline Miller"))
            .await
            .unwrap();
        assert!(default.blurb.contains("Circe"));
    }
}
