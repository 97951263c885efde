pub mod agents;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod llm;
pub mod session;
