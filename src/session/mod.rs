pub mod manager;
pub mod state;

pub use manager::SessionStore;
pub use state::{DashboardState, Session, SessionInfo};
