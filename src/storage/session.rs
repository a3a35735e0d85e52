//! In-memory session store

use crate::core::auth::{Session, SessionStore};
use crate::core::entity::EntityId;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Sessions keyed by random token
///
/// Expired sessions are dropped when their token is next presented, and
/// all of them are swept whenever a new session is opened.
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Store with a lifetime in minutes, as configured
    ///
    /// Lifetimes beyond what `Duration` can hold saturate.
    pub fn with_ttl_minutes(minutes: i64) -> Self {
        Self::new(Duration::try_minutes(minutes).unwrap_or(Duration::MAX))
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_ttl_minutes(24 * 60)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: EntityId, username: &str) -> Result<Session> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| anyhow!("Session lifetime of {} overflows the clock", self.ttl))?;
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user_id,
            username: username.to_string(),
            expires_at,
        };

        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        sessions.retain(|_, existing| !existing.is_expired(now));
        sessions.insert(session.token.clone(), session.clone());

        Ok(session)
    }

    async fn get(&self, token: &str) -> Result<Option<Session>> {
        let now = Utc::now();
        let found = {
            let sessions = self
                .sessions
                .read()
                .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
            sessions.get(token).cloned()
        };

        match found {
            Some(session) if session.is_expired(now) => {
                self.remove(token).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn remove(&self, token: &str) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        sessions.remove(token);
        Ok(())
    }
}
