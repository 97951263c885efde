pub mod users;
pub mod access;

pub use users::{hash_password, verify_credentials, JobRole, Role, UserInfo};
pub use access::ensure_access;
