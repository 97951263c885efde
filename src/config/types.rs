use serde::{Deserialize, Serialize};
use crate::agents::AgentId;
use super::credentials::{env_fallback, resolve_credential};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";
pub const DEFAULT_DEPLOYMENT: &str = "gpt-4";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DentalConfig {
    pub server: Option<ServerConfig>,
    pub session: Option<SessionConfig>,
    pub chat: Option<ChatConfig>,
    pub simulation: Option<SimulationConfig>,
}

impl DentalConfig {
    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn session(&self) -> SessionConfig {
        self.session.clone().unwrap_or_default()
    }

    pub fn chat(&self) -> ChatConfig {
        self.chat.clone().unwrap_or_default()
    }

    pub fn simulation(&self) -> SimulationConfig {
        self.simulation.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_ttl")]
    pub ttl_minutes: i64,
}

fn default_ttl() -> i64 {
    DEFAULT_SESSION_TTL_MINUTES
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_minutes: default_ttl() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatBackend {
    #[default]
    Azure,
    OpenAI,
    Disabled,
}

impl ChatBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Azure => "azure",
            Self::OpenAI => "openai",
            Self::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for ChatBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub provider: ChatBackend,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_version: Option<String>,
    pub deployment: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_history_limit() -> usize {
    10
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: ChatBackend::default(),
            endpoint: None,
            api_key: None,
            api_version: None,
            deployment: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            history_limit: default_history_limit(),
        }
    }
}

impl ChatConfig {
    /// Endpoint from the file (with `$VAR` resolution) or the Azure environment.
    pub fn resolved_endpoint(&self) -> Option<String> {
        resolve_or_env(self.endpoint.as_deref(), &["AZURE_OPENAI_ENDPOINT"])
    }

    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_or_env(self.api_key.as_deref(), &["AZURE_OPENAI_API_KEY"])
    }

    pub fn resolved_api_version(&self) -> String {
        resolve_or_env(self.api_version.as_deref(), &["AZURE_OPENAI_API_VERSION"])
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string())
    }

    pub fn resolved_deployment(&self) -> String {
        resolve_or_env(self.deployment.as_deref(), &["AZURE_OPENAI_DEPLOYMENT_NAME"])
            .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string())
    }
}

fn resolve_or_env(value: Option<&str>, env_names: &[&str]) -> Option<String> {
    value
        .map(resolve_credential)
        .filter(|v| !v.trim().is_empty() && !v.starts_with('$'))
        .or_else(|| env_fallback(env_names))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_rows")]
    pub default_rows: i64,
    #[serde(default = "default_audit_rows")]
    pub audit_rows: i64,
    pub seed: Option<u64>,
}

fn default_rows() -> i64 {
    12
}

fn default_audit_rows() -> i64 {
    5
}

impl SimulationConfig {
    /// Batch size used when a simulation request names no row count.
    pub fn rows_for(&self, agent: AgentId) -> i64 {
        match agent {
            AgentId::Auditor => self.audit_rows,
            _ => self.default_rows,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_rows: default_rows(),
            audit_rows: default_audit_rows(),
            seed: None,
        }
    }
}
