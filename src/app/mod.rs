pub mod batch;
pub mod play;

pub use batch::{BatchScorer, BatchSummary};
pub use play::{play_round, RoundReport};
