use crate::agents::AgentId;
use crate::errors::DentalError;
use super::users::{JobRole, UserInfo};

impl JobRole {
    /// Agents this job role may see and act on.
    pub fn allowed_agents(&self) -> &'static [AgentId] {
        match self {
            JobRole::Admin => &AgentId::ALL,
            JobRole::Doctor => &[AgentId::Nora, AgentId::Auditor],
            JobRole::Receptionist => &[AgentId::Isabella, AgentId::Gabriel, AgentId::Leo],
        }
    }

    pub fn can_access(&self, agent: AgentId) -> bool {
        self.allowed_agents().contains(&agent)
    }
}

pub fn ensure_access(user: &UserInfo, agent: AgentId) -> Result<(), DentalError> {
    if user.job_role.can_access(agent) {
        Ok(())
    } else {
        Err(DentalError::Permission(format!(
            "User '{}' has no access to agent '{}'",
            user.user_id, agent
        )))
    }
}
