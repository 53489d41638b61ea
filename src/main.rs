use anyhow::Context;
use clap::Parser;
use geo_guess::utils::logger;
use geo_guess::utils::validation::{validate_required_field, Validate};
use geo_guess::{
    play_round, BatchScorer, CliConfig, Command, GameError, GameService, InMemorySessionStore,
    MapillaryLocationProvider, ScoringEngine, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => TomlConfig::default(),
    };

    let log_format = config.log_format().unwrap_or_default();
    logger::init_logger(cli.verbose, Some(config.logging.level.as_str()), log_format);

    tracing::info!("Starting geo-guess");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let engine = ScoringEngine::new(config.scoring_params());

    if let Err(e) = run(cli.command, &config, engine).await {
        tracing::error!(
            "geo-guess failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(command: Command, config: &TomlConfig, engine: ScoringEngine) -> Result<(), GameError> {
    match command {
        Command::Score {
            target,
            guess,
            json,
        } => {
            let result = engine.evaluate(target, guess);
            if !result.distance_km.is_finite() {
                return Err(GameError::NonFiniteDistance);
            }
            if json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!("Distance: {:.2} km", result.distance_km);
                println!("Score: {} points", result.score);
            }
        }
        Command::Batch { input, output } => {
            let summary = BatchScorer::new(engine).score_file(&input, &output)?;
            println!(
                "✅ Scored {} rows ({} skipped), total {} points, mean distance {:.2} km",
                summary.rows_scored,
                summary.rows_skipped,
                summary.total_score,
                summary.mean_distance_km
            );
            println!("📁 Output saved to: {}", output);
        }
        Command::Play { user, guess } => {
            let token = config.mapillary.resolved_access_token();
            let token = validate_required_field("mapillary.access_token", &token)?;
            let provider = MapillaryLocationProvider::new(config.mapillary.clone(), token.clone())?;
            let service = GameService::new(provider, InMemorySessionStore::new(), engine);

            let report = play_round(&service, &user, guess).await?;
            let actual = report.actual_location();
            println!("Image: {}", report.game.image_id);
            println!(
                "Actual location: {:.4}, {:.4}",
                actual.latitude, actual.longitude
            );
            println!("Distance: {:.2} km", report.result.distance_km);
            println!("Score: {} points", report.result.score);
        }
    }

    Ok(())
}
