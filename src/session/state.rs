use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use crate::agents::{catalog, AgentId, AgentRecord};
use crate::auth::UserInfo;
use crate::llm::types::ChatTurn;

/// Per-session dashboard data. Guarded by the session's lock, which makes it
/// the single writer for each agent's row collection.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub agents: Vec<AgentRecord>,
    pub simulate_active: bool,
    pub selected_agent: Option<AgentId>,
    pub chat_history: Vec<ChatTurn>,
    pub show_welcome: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            agents: catalog::baseline(),
            simulate_active: false,
            selected_agent: None,
            chat_history: Vec::new(),
            show_welcome: true,
        }
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentRecord> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut AgentRecord> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    /// Store one chat exchange, keeping only the newest `limit` turns.
    pub fn record_exchange(&mut self, user: &str, bot: &str, limit: usize) {
        self.chat_history.push(ChatTurn::user(user));
        self.chat_history.push(ChatTurn::bot(bot));
        let excess = self.chat_history.len().saturating_sub(limit);
        self.chat_history.drain(..excess);
    }

    /// Agents visible to the given job role, in catalog order.
    pub fn visible_agents(&self, allowed: &[AgentId]) -> Vec<AgentRecord> {
        self.agents.iter().filter(|a| allowed.contains(&a.id)).cloned().collect()
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Session {
    pub token: String,
    pub user: UserInfo,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub dashboard: RwLock<DashboardState>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Public view of a session returned on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserInfo,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            expires_at: session.expires_at,
            user: session.user.clone(),
        }
    }
}
