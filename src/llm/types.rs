use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: &str) -> Self {
        Self { role: "system".to_string(), content: content.to_string() }
    }
    pub fn user(content: &str) -> Self {
        Self { role: "user".to_string(), content: content.to_string() }
    }
    pub fn assistant(content: &str) -> Self {
        Self { role: "assistant".to_string(), content: content.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

/// One entry of the dashboard chat history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub who: Speaker,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: &str) -> Self {
        Self { who: Speaker::User, text: text.to_string() }
    }
    pub fn bot(text: &str) -> Self {
        Self { who: Speaker::Bot, text: text.to_string() }
    }

    pub fn to_message(&self) -> Message {
        match self.who {
            Speaker::User => Message::user(&self.text),
            Speaker::Bot => Message::assistant(&self.text),
        }
    }
}
