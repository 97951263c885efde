pub mod commands;
pub mod serve;
pub mod simulate;

pub use commands::{Cli, Commands};
