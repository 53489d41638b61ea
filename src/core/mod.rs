pub mod game;
pub mod scoring;

pub use crate::domain::model::{Coordinate, GameSession, GuessResult, Location, StartedGame};
pub use crate::domain::ports::{LocationProvider, SessionStore};
pub use crate::utils::error::Result;
