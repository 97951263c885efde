use serde::{Deserialize, Serialize};
use crate::errors::DentalError;
use super::rows::RowRecord;

/// The five dashboard agents. Each one owns a distinct row schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentId {
    /// Phone reception (call log rows).
    Isabella,
    /// Patient card intake (document rows).
    Leo,
    /// E-mail triage.
    Gabriel,
    /// Patient summaries.
    Nora,
    /// Record auditing.
    Auditor,
}

impl AgentId {
    pub const ALL: [AgentId; 5] = [
        AgentId::Isabella,
        AgentId::Leo,
        AgentId::Gabriel,
        AgentId::Nora,
        AgentId::Auditor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Isabella => "isabella",
            Self::Leo => "leo",
            Self::Gabriel => "gabriel",
            Self::Nora => "nora",
            Self::Auditor => "auditor",
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentId {
    type Err = DentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DentalError::NotFound(format!("Unknown agent: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
}

impl TaskRecord {
    pub fn pending(description: &str, priority: Priority) -> Self {
        Self {
            description: description.to_string(),
            priority,
            status: TaskStatus::Pending,
        }
    }
}

/// One dashboard card: identity, headline numbers, its data table and open tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    pub id: AgentId,
    pub name: String,
    pub role: String,
    pub notification_text: String,
    /// Ordered `(label, value)` pairs.
    pub kpis: Vec<(String, String)>,
    /// Ordered `(icon, value)` pairs.
    pub mini_kpis: Vec<(String, String)>,
    pub rows: Vec<RowRecord>,
    pub tasks: Vec<TaskRecord>,
}

impl AgentRecord {
    /// Append freshly generated rows. Rows are never removed during a session.
    pub fn append_rows(&mut self, rows: Vec<RowRecord>) {
        self.rows.extend(rows);
    }
}
