use crate::domain::model::{GameSession, GuessResult, Location};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of target locations for new rounds.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// `Ok(None)` means the provider answered but had nothing to offer.
    async fn random_location(&self) -> Result<Option<Location>>;
}

/// Opaque id-keyed storage for game sessions.
///
/// `insert_if_none_open` and `complete_open` are each a single
/// check-and-write: implementations must not let another call observe the
/// state between the check and the write.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<GameSession>>;
    async fn find_incomplete(&self, user_id: &str) -> Result<Vec<GameSession>>;
    async fn insert(&self, session: GameSession) -> Result<()>;

    /// Stores `session` unless its user already has an open one, in which
    /// case the open session is returned and `session` is dropped.
    /// More than one open session is `MultipleActiveSessions`.
    async fn insert_if_none_open(&self, session: GameSession) -> Result<GameSession>;

    /// Records `result` on an open session owned by `user_id` and closes it.
    /// Fails with `SessionNotFound` for a missing or foreign session and
    /// `SessionAlreadyComplete` for a closed one.
    async fn complete_open(
        &self,
        id: &str,
        user_id: &str,
        result: GuessResult,
    ) -> Result<GameSession>;
}
