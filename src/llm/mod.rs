pub mod provider;
pub mod openai;
pub mod azure;
pub mod router;
pub mod types;
pub mod context;
#[cfg(test)]
mod test_server;

pub use provider::ChatProvider;
pub use router::create_provider;
pub use types::{ChatTurn, LLMResponse, Message, Speaker};
