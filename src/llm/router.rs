use std::sync::Arc;
use tracing::{info, warn};
use crate::config::{ChatBackend, ChatConfig};
use super::azure::AzureOpenAIProvider;
use super::openai::OpenAIProvider;
use super::provider::ChatProvider;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Build the configured chat backend. `None` means the assistant is switched
/// off or lacks an endpoint/key; the dashboard keeps working without it.
pub fn create_provider(config: &ChatConfig) -> Option<Arc<dyn ChatProvider>> {
    let provider: Arc<dyn ChatProvider> = match config.provider {
        ChatBackend::Disabled => {
            info!("Chat assistant disabled by configuration");
            return None;
        }
        ChatBackend::Azure => {
            let (Some(endpoint), Some(api_key)) = (config.resolved_endpoint(), config.resolved_api_key()) else {
                warn!("Azure OpenAI is not configured; set AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY");
                return None;
            };
            Arc::new(AzureOpenAIProvider::new(
                &endpoint,
                &api_key,
                &config.resolved_api_version(),
                &config.resolved_deployment(),
                config.temperature,
                config.max_tokens,
            ))
        }
        ChatBackend::OpenAI => {
            let Some(api_key) = config.resolved_api_key() else {
                warn!("OpenAI chat backend has no API key configured");
                return None;
            };
            let base_url = config.resolved_endpoint().unwrap_or_else(|| OPENAI_BASE_URL.to_string());
            Arc::new(OpenAIProvider::new(
                &api_key,
                &config.resolved_deployment(),
                &base_url,
                config.temperature,
                config.max_tokens,
            ))
        }
    };

    info!(provider = provider.provider_name(), model = provider.model_name(), "Chat assistant ready");
    Some(provider)
}
