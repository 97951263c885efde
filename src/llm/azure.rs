use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::config::credentials::redact_credentials;
use crate::errors::DentalError;
use super::openai::{check_status, parse_completion};
use super::provider::ChatProvider;
use super::types::{LLMResponse, Message};

/// Azure OpenAI chat completions against a named deployment.
pub struct AzureOpenAIProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    api_version: String,
    deployment: String,
    temperature: f32,
    max_tokens: u32,
}

impl AzureOpenAIProvider {
    pub fn new(
        endpoint: &str,
        api_key: &str,
        api_version: &str,
        deployment: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_version: api_version.to_string(),
            deployment: deployment.to_string(),
            temperature,
            max_tokens,
        }
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

#[async_trait]
impl ChatProvider for AzureOpenAIProvider {
    async fn chat(&self, messages: &[Message]) -> Result<LLMResponse, DentalError> {
        let body = json!({
            "messages": messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        let resp = self.client
            .post(self.completions_url())
            .header("api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| DentalError::Network(format!(
                "Azure OpenAI request failed: {}",
                redact_credentials(&e.to_string(), &[self.api_key.as_str()])
            )))?;

        let status = resp.status();
        check_status("Azure OpenAI", status)?;

        let data: Value = resp.json().await
            .map_err(|e| DentalError::LLMApi(format!("Failed to parse Azure OpenAI response: {}", e)))?;

        parse_completion("Azure OpenAI", status, &data, &self.deployment)
    }

    fn provider_name(&self) -> &str { "azure" }
    fn model_name(&self) -> &str { &self.deployment }
}
