use std::sync::Arc;
use axum::{extract::State, Extension, Json};
use tracing::{debug, info};
use crate::api::models::{ChatRequest, ChatResponse};
use crate::api::AppState;
use crate::errors::DentalError;
use crate::llm::context::build_messages;
use crate::session::Session;

pub async fn chat(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, DentalError> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(DentalError::InvalidArgument("No message provided".into()));
    }

    let provider = state.chat.as_ref().ok_or_else(|| {
        DentalError::ChatUnavailable(
            "Chat provider is not configured. Set AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY.".into(),
        )
    })?;

    let messages = {
        let dashboard = session.dashboard.read().await;
        let agents = dashboard.visible_agents(session.user.job_role.allowed_agents());
        let history = body.history.as_deref().unwrap_or(&dashboard.chat_history[..]);
        build_messages(message, &agents, history, state.history_limit)
    };

    debug!(
        user_id = %session.user.user_id,
        provider = provider.provider_name(),
        messages = messages.len(),
        "Sending chat request"
    );
    let reply = provider.chat(&messages).await?;
    info!(
        user_id = %session.user.user_id,
        model = %reply.model,
        output_tokens = ?reply.output_tokens,
        "Chat reply received"
    );

    let mut dashboard = session.dashboard.write().await;
    dashboard.record_exchange(message, &reply.content, state.history_limit);

    Ok(Json(ChatResponse { response: reply.content }))
}
