use crate::domain::model::Coordinate;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "geo-guess")]
#[command(about = "Score geography guesses by great-circle distance")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Score one guess against a target
    Score {
        /// Target as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        target: Coordinate,

        /// Guess as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        guess: Coordinate,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score every row of a CSV file
    Batch {
        #[arg(short, long)]
        input: String,

        #[arg(short, long)]
        output: String,
    },

    /// Play one round against a Mapillary target
    Play {
        #[arg(long, default_value = "local-player")]
        user: String,

        /// Guess as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        guess: Coordinate,
    },
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }

        match &self.command {
            Command::Score { .. } => Ok(()),
            Command::Batch { input, output } => {
                validate_path("input", input)?;
                validate_path("output", output)
            }
            Command::Play { user, guess } => {
                validate_non_empty_string("user", user)?;
                guess.validate()
            }
        }
    }
}
