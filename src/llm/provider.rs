use async_trait::async_trait;
use crate::errors::DentalError;
use super::types::{LLMResponse, Message};

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Chat completion over an ordered message list
    async fn chat(&self, messages: &[Message]) -> Result<LLMResponse, DentalError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model or deployment identifier
    fn model_name(&self) -> &str;
}
