use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{config::DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES, errors::AppResult, models::domain::QuizSession};

pub type SharedSession = Arc<Mutex<QuizSession>>;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: QuizSession) -> AppResult<SharedSession>;
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<SharedSession>>;
    async fn delete(&self, id: &Uuid) -> AppResult<bool>;
    async fn count(&self) -> AppResult<usize>;

    /// Drops idle sessions, returning how many were removed.
    async fn prune_expired(&self) -> AppResult<usize> {
        Ok(0)
    }
}

/// Sessions live in process memory until they sit idle past the timeout.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
    idle_timeout: Duration,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::with_idle_timeout(Duration::minutes(i64::from(
            DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES,
        )))
    }
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// A session locked by a running operation is never expired.
    fn is_expired(&self, session: &SharedSession, now: DateTime<Utc>) -> bool {
        match session.try_lock() {
            Ok(guard) => now - guard.updated_at > self.idle_timeout,
            Err(_) => false,
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: QuizSession) -> AppResult<SharedSession> {
        self.prune_expired().await?;

        let id = session.id;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        log::debug!("Created quiz session {}", id);
        Ok(shared)
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<SharedSession>> {
        let found = self.sessions.read().await.get(id).cloned();
        match found {
            Some(shared) if self.is_expired(&shared, Utc::now()) => {
                let mut sessions = self.sessions.write().await;
                // Another request may have touched it since the read.
                if let Some(current) = sessions.get(id) {
                    if !self.is_expired(current, Utc::now()) {
                        return Ok(Some(current.clone()));
                    }
                }
                sessions.remove(id);
                log::info!("Quiz session {} expired", id);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            log::debug!("Deleted quiz session {}", id);
        }
        Ok(removed)
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.sessions.read().await.len())
    }

    async fn prune_expired(&self) -> AppResult<usize> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, shared| !self.is_expired(shared, now));
        let removed = before - sessions.len();
        if removed > 0 {
            log::info!("Pruned {} idle quiz sessions", removed);
        }
        Ok(removed)
    }
}
