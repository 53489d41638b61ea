use crate::core::game::GameService;
use crate::core::{LocationProvider, SessionStore};
use crate::domain::model::{Coordinate, GameSession, GuessResult, StartedGame};
use crate::utils::error::Result;
use serde::Serialize;

/// Everything a client shows once a round is over.
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub game: StartedGame,
    pub result: GuessResult,
    pub session: GameSession,
}

impl RoundReport {
    pub fn actual_location(&self) -> Coordinate {
        self.session.target
    }
}

/// Start (or resume) a round for `user_id`, submit `guess`, and collect the results.
pub async fn play_round<L: LocationProvider, S: SessionStore>(
    service: &GameService<L, S>,
    user_id: &str,
    guess: Coordinate,
) -> Result<RoundReport> {
    let game = service.start_new_game(user_id).await?;
    let result = service
        .evaluate_guess(&game.game_session_id, user_id, guess)
        .await?;
    let session = service
        .get_game_results(&game.game_session_id, user_id)
        .await?;

    Ok(RoundReport {
        game,
        result,
        session,
    })
}
