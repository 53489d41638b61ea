use crate::core::SessionStore;
use crate::domain::model::{GameSession, GuessResult};
use crate::utils::error::{GameError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local session store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, GameSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &str) -> Result<Option<GameSession>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_incomplete(&self, user_id: &str) -> Result<Vec<GameSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|s| s.user_id == user_id && !s.is_complete)
            .cloned()
            .collect())
    }

    async fn insert(&self, session: GameSession) -> Result<()> {
        tracing::debug!("Storing session {}", session.id);
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session);
        Ok(())
    }

    async fn insert_if_none_open(&self, session: GameSession) -> Result<GameSession> {
        let mut sessions = self.sessions.write().await;

        let mut open: Vec<GameSession> = sessions
            .values()
            .filter(|s| s.user_id == session.user_id && !s.is_complete)
            .take(2)
            .cloned()
            .collect();
        match open.len() {
            0 => {
                tracing::debug!("Storing session {}", session.id);
                sessions.insert(session.id.clone(), session.clone());
                Ok(session)
            }
            1 => Ok(open.remove(0)),
            _ => Err(GameError::MultipleActiveSessions {
                user_id: session.user_id,
            }),
        }
    }

    async fn complete_open(
        &self,
        id: &str,
        user_id: &str,
        result: GuessResult,
    ) -> Result<GameSession> {
        let mut sessions = self.sessions.write().await;

        let session = match sessions.get_mut(id) {
            Some(session) if session.user_id == user_id => session,
            _ => {
                return Err(GameError::SessionNotFound {
                    game_id: id.to_string(),
                })
            }
        };
        if session.is_complete {
            return Err(GameError::SessionAlreadyComplete {
                game_id: id.to_string(),
            });
        }

        session.score = session.score.saturating_add(result.score);
        session.distance_km = Some(result.distance_km);
        session.is_complete = true;
        Ok(session.clone())
    }
}
