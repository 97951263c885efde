use serde::{Deserialize, Serialize};
use crate::agents::{AgentId, AgentRecord, RowRecord};
use crate::auth::UserInfo;
use crate::llm::ChatTurn;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub client_id: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
pub struct SimulateRequest {
    /// Defaults to the configured batch size for the agent.
    pub rows: Option<i64>,
}

#[derive(Serialize)]
pub struct SimulateResponse {
    pub agent_id: AgentId,
    pub generated: Vec<RowRecord>,
    pub total_rows: usize,
}

#[derive(Deserialize)]
pub struct SimulationToggle {
    pub active: bool,
    pub agent_id: Option<String>,
}

#[derive(Serialize)]
pub struct SimulationStatus {
    pub simulate_active: bool,
    pub selected_agent: Option<AgentId>,
    pub generated: usize,
}

/// Everything the presentation layer needs to render the dashboard.
#[derive(Serialize)]
pub struct DashboardPayload {
    pub agents: Vec<AgentRecord>,
    pub simulate_active: bool,
    pub selected_agent: Option<AgentId>,
    pub user_info: UserInfo,
    pub show_welcome: bool,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Overrides the session history when present.
    pub history: Option<Vec<ChatTurn>>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}
