use crate::app_error::AppError;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub(crate) const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

impl ContentBlock {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Message {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct MessagesRequest {
    pub model: String,
    pub system: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
}

impl MessagesRequest {
    pub(crate) fn new(model: &str, system: &str, user_text: &str, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            system: system.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![ContentBlock::text(user_text)],
            }],
            max_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl MessagesResponse {
    /// The first content block is taken as the whole reply.
    pub(crate) fn reply_text(&self) -> Option<&str> {
        self.content.first().map(|block| block.text.as_str())
    }
}

pub(crate) trait LlmApi: Send + Sync {
    fn model_name(&self) -> &str;
    fn send<'a>(
        &'a self,
        request: &'a MessagesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<MessagesResponse, AppError>> + Send + 'a>>;
}

pub(crate) struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AnthropicClient {
    pub(crate) fn new(
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            base_url,
            model,
        })
    }

    pub(crate) fn url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    // Single attempt. A failure is returned to the caller as is.
    pub(crate) async fn query_once(
        &self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, AppError> {
        let body = serde_json::to_vec(request).map_err(|e| AppError::Marshal(e.to_string()))?;
        tracing::debug!(body = %String::from_utf8_lossy(&body), "sending request to API");

        let resp = self
            .client
            .post(self.url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(censor_api_key_in_error_string(e, &self.api_key)))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AppError::Transport(censor_api_key_in_error_string(e, &self.api_key)))?;

        tracing::debug!(%status, "response status");
        tracing::debug!(body = %text, "response body");

        if status != StatusCode::OK {
            return Err(AppError::Status {
                status: status.as_u16(),
                body: censor_api_key(&text, &self.api_key),
            });
        }

        serde_json::from_str(&text).map_err(|e| AppError::Unmarshal(e.to_string()))
    }
}

impl LlmApi for AnthropicClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn send<'a>(
        &'a self,
        request: &'a MessagesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<MessagesResponse, AppError>> + Send + 'a>> {
        Box::pin(self.query_once(request))
    }
}

pub(crate) fn censor_api_key(text: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return text.to_string();
    }
    // Keys of 8 bytes or fewer are not partially revealed.
    let censored_key = if api_key.len() > 8 && api_key.is_char_boundary(api_key.len() - 4) {
        format!("...{}", &api_key[api_key.len() - 4..])
    } else {
        "...".to_string()
    };
    text.replace(api_key, &censored_key)
}

fn censor_api_key_in_error_string(e: reqwest::Error, api_key: &str) -> String {
    censor_api_key(&e.to_string(), api_key)
}
