pub mod health;
pub mod session;
pub mod dashboard;
pub mod agents;
pub mod chat;
