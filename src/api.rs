// API client module: a small blocking HTTP client for an OpenAI-style
// chat-completion endpoint. One prompt in, one generated text out; no
// retries and no timeout beyond what reqwest does by default.

use crate::config::ApiConfig;
use crate::error::ApiError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Anything that can turn a prompt into generated text. The session only
/// depends on this, so tests and UI decorators can stand in for the real
/// client.
pub trait Completion {
    fn complete(&self, prompt: &str) -> Result<String, ApiError>;
}

impl<T: Completion + ?Sized> Completion for &T {
    fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        (**self).complete(prompt)
    }
}

/// Holds a reqwest blocking client and the settings resolved at startup.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

/// Request body for `POST /chat/completions`.
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Only the fields we read; everything else in the response is ignored.
#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

impl CompletionClient {
    /// Build a client from the bootstrap configuration. The key is not
    /// checked here; an empty one is rejected by the service on first use.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(CompletionClient {
            client,
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl Completion for CompletionClient {
    /// Send `prompt` as a single user message and return the first
    /// choice's content exactly as received.
    fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        let url = self.endpoint();
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        debug!(url = %url, model = %self.model, prompt_len = prompt.len(), "Sending completion request");

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                debug!("Completion request failed: {}", e);
                ApiError::Transport(e)
            })?;

        let status = res.status();
        debug!(status = %status, "Completion response received");
        if !status.is_success() {
            let txt = res.text().unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), txt);
            debug!("Completion service rejected the request: {}", err);
            return Err(err);
        }

        let text = res.text()?;
        extract_content(&text).map_err(|e| {
            debug!("Unusable completion response: {}", e);
            e
        })
    }
}

/// Pull `choices[0].message.content` out of a response body.
fn extract_content(body: &str) -> Result<String, ApiError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::ResponseShape(format!("invalid JSON body: {}", e)))?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::ResponseShape("no choices in response".into()))?;
    match choice.message.content {
        Some(content) if content.is_empty() => {
            Err(ApiError::ResponseShape("first choice has empty content".into()))
        }
        Some(content) => Ok(content),
        None => Err(ApiError::ResponseShape("first choice has no content".into())),
    }
}
