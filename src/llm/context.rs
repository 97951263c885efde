//! Prompt assembly for the dashboard assistant.

use crate::agents::AgentRecord;
use super::types::{ChatTurn, Message};

/// Sample rows per agent included in the context.
pub const SAMPLE_ROWS: usize = 5;

pub const SYSTEM_PROMPT: &str = "You are Axel, an intelligent assistant for a dental clinic. \
You help the staff with administrative tasks and questions about the agents and their data.

Your role:
- Answer questions about the agents (Isabella, Gabriel, Leo, Nora, Auditor)
- Provide information about their data and statistics
- Suggest how to resolve the problems they report
- Reply in a friendly, professional tone

You have access to every visible agent's KPIs, sample data and role.

Keep answers short but informative. If you do not know the answer, say so honestly.";

/// Render the agents' KPIs and a few sample rows as plain text.
pub fn build_context(agents: &[AgentRecord]) -> String {
    let mut parts = Vec::new();
    for agent in agents.iter().filter(|a| !a.rows.is_empty()) {
        let kpis = agent
            .kpis
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join(", ");

        let rows = agent
            .rows
            .iter()
            .take(SAMPLE_ROWS)
            .map(|row| {
                let fields = row
                    .fields()
                    .into_iter()
                    .filter(|(_, v)| !v.is_empty())
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("  - {}", fields)
            })
            .collect::<Vec<_>>()
            .join("\n");

        parts.push(format!(
            "Agent: {} ({})\nID: {}\nKPIs: {}\nSample Data:\n{}\n",
            agent.name, agent.role, agent.id, kpis, rows
        ));
    }
    parts.join("\n")
}

/// System prompt, agent context, the most recent history, then the new message.
pub fn build_messages(
    user_message: &str,
    agents: &[AgentRecord],
    history: &[ChatTurn],
    history_limit: usize,
) -> Vec<Message> {
    let context = build_context(agents);
    let mut messages = vec![
        Message::system(SYSTEM_PROMPT),
        Message::system(&format!(
            "Context from the agents:\n{}\n\nUse this information to answer the user's questions.",
            context
        )),
    ];

    let skip = history.len().saturating_sub(history_limit);
    messages.extend(history.iter().skip(skip).map(ChatTurn::to_message));
    messages.push(Message::user(user_message));
    messages
}
