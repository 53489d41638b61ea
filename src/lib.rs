pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{InMemorySessionStore, MapillaryConfig, MapillaryLocationProvider};
pub use crate::app::{play_round, BatchScorer, BatchSummary, RoundReport};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::game::GameService;
pub use crate::core::scoring::{compute_distance, compute_score, ScoringEngine, ScoringParams};
pub use crate::domain::model::{Coordinate, GameSession, GuessResult, Location, StartedGame};
pub use crate::utils::error::{GameError, Result};
