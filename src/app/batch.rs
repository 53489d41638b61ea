use crate::core::scoring::ScoringEngine;
use crate::domain::model::Coordinate;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct GuessRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub target_lat: f64,
    pub target_lon: f64,
    pub guess_lat: f64,
    pub guess_lon: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecord {
    pub id: Option<String>,
    pub target_lat: f64,
    pub target_lon: f64,
    pub guess_lat: f64,
    pub guess_lon: f64,
    pub distance_km: f64,
    pub score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub rows_scored: usize,
    pub rows_skipped: usize,
    pub total_score: u64,
    pub mean_distance_km: f64,
}

pub struct BatchScorer {
    engine: ScoringEngine,
}

impl BatchScorer {
    pub fn new(engine: ScoringEngine) -> Self {
        Self { engine }
    }

    pub fn score_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<BatchSummary> {
        let input = input.as_ref();
        let output = output.as_ref();
        tracing::info!("Scoring guesses from {}", input.display());

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let summary = self.score(File::open(input)?, File::create(output)?)?;
        tracing::info!(
            "Wrote {} scored rows to {} ({} skipped)",
            summary.rows_scored,
            output.display(),
            summary.rows_skipped
        );
        Ok(summary)
    }

    pub fn score<R: Read, W: Write>(&self, input: R, output: W) -> Result<BatchSummary> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
        let mut writer = csv::Writer::from_writer(output);

        let mut summary = BatchSummary::default();
        let mut distance_sum = 0.0;

        for (index, row) in reader.deserialize::<GuessRecord>().enumerate() {
            let record = row?;
            let target = Coordinate::new(record.target_lat, record.target_lon);
            let guess = Coordinate::new(record.guess_lat, record.guess_lon);
            let result = self.engine.evaluate(target, guess);

            if !result.distance_km.is_finite() {
                tracing::warn!("Skipping row {}: non-finite distance", index + 1);
                summary.rows_skipped += 1;
                continue;
            }

            writer.serialize(ScoredRecord {
                id: record.id,
                target_lat: record.target_lat,
                target_lon: record.target_lon,
                guess_lat: record.guess_lat,
                guess_lon: record.guess_lon,
                distance_km: result.distance_km,
                score: result.score,
            })?;

            summary.rows_scored += 1;
            summary.total_score += u64::from(result.score);
            distance_sum += result.distance_km;
        }

        writer.flush()?;

        if summary.rows_scored > 0 {
            summary.mean_distance_km = distance_sum / summary.rows_scored as f64;
        }
        Ok(summary)
    }
}
