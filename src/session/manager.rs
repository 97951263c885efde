use std::sync::Arc;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use crate::auth::UserInfo;
use super::state::{DashboardState, Session};

/// Token → session map with explicit expiry.
pub struct SessionStore {
    sessions: DashMap<String, Arc<Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Open a session for an authenticated user.
    pub fn create(&self, user: UserInfo) -> Arc<Session> {
        let now = Utc::now();
        let session = Arc::new(Session {
            token: uuid::Uuid::new_v4().to_string(),
            user,
            created_at: now,
            expires_at: now + self.ttl,
            dashboard: RwLock::new(DashboardState::new()),
        });
        self.sessions.insert(session.token.clone(), session.clone());
        info!(user_id = %session.user.user_id, expires_at = %session.expires_at, "Session created");
        session
    }

    /// Live session for `token`. Expired sessions are dropped on sight.
    pub fn get(&self, token: &str) -> Option<Arc<Session>> {
        let session = self.sessions.get(token).map(|s| s.value().clone())?;
        if session.is_expired_at(Utc::now()) {
            self.sessions.remove(token);
            debug!(user_id = %session.user.user_id, "Session expired");
            return None;
        }
        Some(session)
    }

    pub fn remove(&self, token: &str) -> bool {
        match self.sessions.remove(token) {
            Some((_, session)) => {
                info!(user_id = %session.user.user_id, "Session closed");
                true
            }
            None => false,
        }
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired_at(now));
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            debug!(purged, "Purged expired sessions");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
