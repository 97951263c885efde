use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use crate::config::credentials::redact_credentials;
use crate::errors::DentalError;
use super::provider::ChatProvider;
use super::types::{LLMResponse, Message};

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    pub fn new(api_key: &str, model: &str, base_url: &str, temperature: f32, max_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature,
            max_tokens,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAIProvider {
    async fn chat(&self, messages: &[Message]) -> Result<LLMResponse, DentalError> {
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        let resp = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| DentalError::Network(format!(
                "OpenAI request failed: {}",
                redact_credentials(&e.to_string(), &[self.api_key.as_str()])
            )))?;

        let status = resp.status();
        check_status("OpenAI", status)?;

        let data: Value = resp.json().await
            .map_err(|e| DentalError::LLMApi(format!("Failed to parse OpenAI response: {}", e)))?;

        parse_completion("OpenAI", status, &data, &self.model)
    }

    fn provider_name(&self) -> &str { "openai" }
    fn model_name(&self) -> &str { &self.model }
}

/// Status codes that decide the outcome regardless of the body. Gateways
/// often answer these with plain text, so this runs before the body is parsed.
pub(crate) fn check_status(label: &str, status: StatusCode) -> Result<(), DentalError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(DentalError::RateLimit(format!("{} rate limit", label)));
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(DentalError::LLMApi(format!("{} rejected the configured API key", label)));
    }
    Ok(())
}

/// Turn a chat-completions response body into an [`LLMResponse`].
/// Shared by every OpenAI-shaped backend.
pub(crate) fn parse_completion(
    label: &str,
    status: StatusCode,
    data: &Value,
    model: &str,
) -> Result<LLMResponse, DentalError> {
    check_status(label, status)?;

    if let Some(error) = data.get("error") {
        let message = error["message"].as_str().unwrap_or("Unknown");
        return Err(DentalError::LLMApi(format!("{}: {}", label, message)));
    }
    if !status.is_success() {
        return Err(DentalError::LLMApi(format!("{} returned HTTP {}", label, status.as_u16())));
    }

    let content = data["choices"][0]["message"]["content"].as_str()
        .ok_or_else(|| DentalError::LLMApi(format!("No content in {} response", label)))?
        .trim()
        .to_string();

    Ok(LLMResponse {
        content,
        input_tokens: data["usage"]["prompt_tokens"].as_u64(),
        output_tokens: data["usage"]["completion_tokens"].as_u64(),
        model: data["model"].as_str().unwrap_or(model).to_string(),
    })
}
