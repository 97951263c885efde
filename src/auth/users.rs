use std::sync::LazyLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{debug, info};
use crate::errors::DentalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Clinic job role; decides which agents a user may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobRole {
    Admin,
    Doctor,
    Receptionist,
}

/// Authenticated user as exposed to the rest of the service. Never carries the hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub client_id: String,
    pub name: String,
    pub role: Role,
    pub job_role: JobRole,
}

struct UserEntry {
    user_id: &'static str,
    client_id: &'static str,
    password_hash: String,
    name: &'static str,
    role: Role,
    job_role: JobRole,
}

static USERS: LazyLock<Vec<UserEntry>> = LazyLock::new(|| {
    let entry = |user_id: &'static str,
                 client_id: &'static str,
                 password: &str,
                 name: &'static str,
                 role: Role,
                 job_role: JobRole| UserEntry {
        user_id,
        client_id,
        password_hash: hash_password(password),
        name,
        role,
        job_role,
    };
    vec![
        entry("demo_user", "client001", "password123", "Demo User", Role::User, JobRole::Admin),
        entry("admin", "client001", "admin123", "Administrator", Role::Admin, JobRole::Admin),
        entry("dr_novak", "clinic_dental", "dental2024", "Dr. Novák", Role::User, JobRole::Doctor),
        entry("receptionist", "clinic_dental", "reception123", "Receptionist", Role::User, JobRole::Receptionist),
    ]
});

/// Hex-encoded SHA-256 digest of a password.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check a login attempt against the user table.
///
/// Unknown user, client mismatch and wrong password are indistinguishable to
/// the caller.
pub fn verify_credentials(user_id: &str, client_id: &str, password: &str) -> Result<UserInfo, DentalError> {
    let rejected = || DentalError::Authentication("Invalid user ID, client ID or password".into());

    let user = USERS.iter().find(|u| u.user_id == user_id).ok_or_else(|| {
        debug!(user_id = %user_id, "Login rejected: unknown user");
        rejected()
    })?;

    let supplied = hash_password(password);
    let hash_ok = bool::from(supplied.as_bytes().ct_eq(user.password_hash.as_bytes()));
    if user.client_id != client_id || !hash_ok {
        debug!(user_id = %user_id, "Login rejected: credentials mismatch");
        return Err(rejected());
    }

    info!(user_id = %user_id, client_id = %client_id, "User authenticated");
    Ok(UserInfo {
        user_id: user.user_id.to_string(),
        client_id: user.client_id.to_string(),
        name: user.name.to_string(),
        role: user.role,
        job_role: user.job_role,
    })
}
