//! Distance and score computation for a single guess.
//!
//! Everything here is pure: no I/O, no shared state. A [`ScoringEngine`] is
//! `Copy` and can be handed to any number of tasks.

use crate::domain::model::{Coordinate, GuessResult};
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_float, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const DEFAULT_MAX_SCORE: u32 = 1000;
pub const DEFAULT_PENALTY_PER_KM: f64 = 10.0;

/// Linear decay parameters. A guess scores zero once it is
/// `max_score / penalty_per_km` kilometres away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    pub max_score: u32,
    pub penalty_per_km: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            max_score: DEFAULT_MAX_SCORE,
            penalty_per_km: DEFAULT_PENALTY_PER_KM,
        }
    }
}

impl ScoringParams {
    /// Distance at and beyond which the score is zero.
    pub fn zero_score_distance_km(&self) -> f64 {
        self.max_score as f64 / self.penalty_per_km
    }
}

impl Validate for ScoringParams {
    fn validate(&self) -> Result<()> {
        validate_positive_number("scoring.max_score", self.max_score as u64, 1)?;
        validate_positive_float("scoring.penalty_per_km", self.penalty_per_km)
    }
}

/// Great-circle distance between two points in kilometres (haversine).
///
/// Total over its inputs: out-of-range degrees still yield a number, and a
/// NaN anywhere yields NaN.
pub fn compute_distance(target: Coordinate, guess: Coordinate) -> f64 {
    let lat1 = target.latitude.to_radians();
    let lat2 = guess.latitude.to_radians();
    let d_lat = (guess.latitude - target.latitude).to_radians();
    let d_lon = (guess.longitude - target.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 near antipodes. clamp keeps NaN.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Linear score decay, floored at zero and rounded half away from zero.
///
/// Negative distances are not rejected and score above `max_score`.
/// A NaN distance scores zero.
pub fn compute_score(distance_km: f64, params: &ScoringParams) -> u32 {
    let raw = params.max_score as f64 - distance_km * params.penalty_per_km;
    raw.max(0.0).round() as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoringEngine {
    params: ScoringParams,
}

impl ScoringEngine {
    pub fn new(params: ScoringParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub fn distance(&self, target: Coordinate, guess: Coordinate) -> f64 {
        compute_distance(target, guess)
    }

    pub fn score(&self, distance_km: f64) -> u32 {
        compute_score(distance_km, &self.params)
    }

    pub fn evaluate(&self, target: Coordinate, guess: Coordinate) -> GuessResult {
        let distance_km = self.distance(target, guess);
        GuessResult {
            score: self.score(distance_km),
            distance_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(compute_distance(PARIS, PARIS), 0.0);
        assert_eq!(compute_distance(Coordinate::new(-90.0, 0.0), Coordinate::new(-90.0, 0.0)), 0.0);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = compute_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn test_antipodes() {
        let d = compute_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 0.1);
        assert!((d - 20015.09).abs() < 0.1);
    }

    #[test]
    fn test_out_of_range_still_finite() {
        let d = compute_distance(Coordinate::new(120.0, 400.0), Coordinate::new(-95.0, -200.0));
        assert!(d.is_finite());
        assert!(d >= 0.0);
        assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
    }

    #[test]
    fn test_nan_propagates() {
        let d = compute_distance(Coordinate::new(f64::NAN, 0.0), PARIS);
        assert!(d.is_nan());
        assert_eq!(compute_score(d, &ScoringParams::default()), 0);
    }

    #[test]
    fn test_score_bounds() {
        let params = ScoringParams::default();
        assert_eq!(compute_score(0.0, &params), 1000);
        assert_eq!(compute_score(100.0, &params), 0);
        assert_eq!(compute_score(5000.0, &params), 0);
        assert_eq!(compute_score(0.04, &params), 1000);
        assert_eq!(compute_score(0.06, &params), 999);
        assert_eq!(compute_score(68.5, &params), 315);
    }

    #[test]
    fn test_negative_distance_exceeds_cap() {
        assert_eq!(compute_score(-1.0, &ScoringParams::default()), 1010);
    }

    #[test]
    fn test_custom_params() {
        let params = ScoringParams {
            max_score: 500,
            penalty_per_km: 5.0,
        };
        assert_eq!(params.zero_score_distance_km(), 100.0);
        assert_eq!(compute_score(0.0, &params), 500);
        assert_eq!(compute_score(50.0, &params), 250);
        assert_eq!(compute_score(100.0, &params), 0);
    }

    #[test]
    fn test_params_validation() {
        assert!(ScoringParams::default().validate().is_ok());
        assert!(ScoringParams {
            max_score: 0,
            penalty_per_km: 10.0
        }
        .validate()
        .is_err());
        assert!(ScoringParams {
            max_score: 1000,
            penalty_per_km: 0.0
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_engine_evaluate() {
        let engine = ScoringEngine::default();
        let result = engine.evaluate(PARIS, PARIS);
        assert_eq!(result.score, 1000);
        assert_eq!(result.distance_km, 0.0);
    }
}
