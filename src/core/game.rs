use crate::core::scoring::ScoringEngine;
use crate::core::{LocationProvider, SessionStore};
use crate::domain::model::{Coordinate, GameSession, GuessResult, StartedGame};
use crate::utils::error::{GameError, Result};
use crate::utils::validation::{validate_latitude, validate_longitude};
use uuid::Uuid;

/// Runs rounds: picks a target, scores the guess, keeps the session.
pub struct GameService<L: LocationProvider, S: SessionStore> {
    locations: L,
    sessions: S,
    engine: ScoringEngine,
}

impl<L: LocationProvider, S: SessionStore> GameService<L, S> {
    pub fn new(locations: L, sessions: S, engine: ScoringEngine) -> Self {
        Self {
            locations,
            sessions,
            engine,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Resumes the user's open round, or starts a new one.
    #[tracing::instrument(skip(self))]
    pub async fn start_new_game(&self, user_id: &str) -> Result<StartedGame> {
        let mut open = self.sessions.find_incomplete(user_id).await?;

        match open.len() {
            0 => {}
            1 => {
                let existing = open.remove(0);
                tracing::info!(
                    "Existing game session found: {} (location {})",
                    existing.id,
                    existing.location_id
                );
                return Ok(StartedGame::from(&existing));
            }
            n => {
                tracing::error!("{} incomplete game sessions found for user {}", n, user_id);
                return Err(GameError::MultipleActiveSessions {
                    user_id: user_id.to_string(),
                });
            }
        }

        let location = self.locations.random_location().await?.ok_or_else(|| {
            tracing::error!("No location found to start the game");
            GameError::NoLocationFound
        })?;

        let candidate =
            GameSession::new(Uuid::new_v4().to_string(), user_id.to_string(), location);
        let candidate_id = candidate.id.clone();
        let session = self.sessions.insert_if_none_open(candidate).await?;

        if session.id == candidate_id {
            tracing::info!(
                "New game session created: {} (location {})",
                session.id,
                session.location_id
            );
        } else {
            // Another start for this user won the race; join its round.
            tracing::info!(
                "Concurrent start resolved to existing session {} (location {})",
                session.id,
                session.location_id
            );
        }
        Ok(StartedGame::from(&session))
    }

    /// Scores a guess against the session's target and closes the round.
    #[tracing::instrument(skip(self))]
    pub async fn evaluate_guess(
        &self,
        game_id: &str,
        user_id: &str,
        guess: Coordinate,
    ) -> Result<GuessResult> {
        validate_latitude("guess.latitude", guess.latitude)?;
        validate_longitude("guess.longitude", guess.longitude)?;

        let session = self.session_for_user(game_id, user_id).await?;
        if session.is_complete {
            return Err(GameError::SessionAlreadyComplete {
                game_id: game_id.to_string(),
            });
        }

        let result = self.engine.evaluate(session.target, guess);
        if !result.distance_km.is_finite() {
            tracing::error!(
                "Non-finite distance for target {:?} and guess {:?}",
                session.target,
                guess
            );
            return Err(GameError::NonFiniteDistance);
        }

        // The check above is a fast path; the store decides which guess counts.
        self.sessions.complete_open(game_id, user_id, result).await?;

        tracing::info!(
            "Guess scored: {} points at {:.2} km",
            result.score,
            result.distance_km
        );
        Ok(result)
    }

    pub async fn get_game_results(&self, game_id: &str, user_id: &str) -> Result<GameSession> {
        self.session_for_user(game_id, user_id).await
    }

    // Sessions owned by someone else are reported as missing.
    async fn session_for_user(&self, game_id: &str, user_id: &str) -> Result<GameSession> {
        match self.sessions.get(game_id).await? {
            Some(session) if session.user_id == user_id => Ok(session),
            _ => Err(GameError::SessionNotFound {
                game_id: game_id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::InMemorySessionStore;
    use crate::domain::model::Location;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedProvider {
        location: Option<Location>,
        calls: Arc<AtomicUsize>,
    }

    impl FixedProvider {
        fn at(lat: f64, lon: f64) -> Self {
            Self {
                location: Some(Location {
                    id: "img-42".to_string(),
                    coordinate: Coordinate::new(lat, lon),
                }),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn empty() -> Self {
            Self {
                location: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl LocationProvider for FixedProvider {
        async fn random_location(&self) -> Result<Option<Location>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.location.clone())
        }
    }

    fn service(provider: FixedProvider) -> GameService<FixedProvider, InMemorySessionStore> {
        GameService::new(provider, InMemorySessionStore::new(), ScoringEngine::default())
    }

    #[tokio::test]
    async fn test_start_then_resume() {
        let provider = FixedProvider::at(48.8566, 2.3522);
        let calls = provider.calls.clone();
        let game = service(provider);

        let first = game.start_new_game("alice").await.unwrap();
        assert_eq!(first.image_id, "img-42");

        let again = game.start_new_game("alice").await.unwrap();
        assert_eq!(again, first);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_location() {
        let game = service(FixedProvider::empty());
        let err = game.start_new_game("alice").await.unwrap_err();
        assert!(matches!(err, GameError::NoLocationFound));
    }

    #[tokio::test]
    async fn test_perfect_guess_closes_round() {
        let game = service(FixedProvider::at(48.8566, 2.3522));
        let started = game.start_new_game("alice").await.unwrap();

        let result = game
            .evaluate_guess(&started.game_session_id, "alice", Coordinate::new(48.8566, 2.3522))
            .await
            .unwrap();
        assert_eq!(result.score, 1000);
        assert_eq!(result.distance_km, 0.0);

        let session = game
            .get_game_results(&started.game_session_id, "alice")
            .await
            .unwrap();
        assert!(session.is_complete);
        assert_eq!(session.score, 1000);
        assert_eq!(session.distance_km, Some(0.0));
    }

    #[tokio::test]
    async fn test_invalid_guess_rejected_before_lookup() {
        let game = service(FixedProvider::at(0.0, 0.0));
        let err = game
            .evaluate_guess("missing", "alice", Coordinate::new(f64::NAN, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidCoordinate { .. }));
    }
}
