pub mod model;
pub mod rows;
pub mod catalog;
pub mod simulator;

pub use model::{AgentId, AgentRecord, Priority, TaskRecord, TaskStatus};
pub use rows::RowRecord;
pub use simulator::generate;
