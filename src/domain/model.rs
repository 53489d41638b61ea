use crate::utils::error::{GameError, Result};
use crate::utils::validation::{validate_latitude, validate_longitude, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A point on the globe in decimal degrees.
///
/// No normalisation happens on construction: values outside the usual
/// ranges are kept as given. Use [`Validate`] where a caller needs them
/// checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Validate for Coordinate {
    fn validate(&self) -> Result<()> {
        validate_latitude("latitude", self.latitude)?;
        validate_longitude("longitude", self.longitude)
    }
}

/// Parses `"LAT,LON"`, the form used on the command line.
impl FromStr for Coordinate {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GameError::InvalidCoordinate {
            field: "coordinate".to_string(),
            value: s.to_string(),
        };

        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let latitude = lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let longitude = lon.trim().parse::<f64>().map_err(|_| invalid())?;
        Ok(Self::new(latitude, longitude))
    }
}

/// Outcome of a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuessResult {
    pub score: u32,
    #[serde(rename = "distance")]
    pub distance_km: f64,
}

/// A target picked by the imagery provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: String,
    pub user_id: String,
    pub location_id: String,
    pub target: Coordinate,
    pub score: u32,
    pub distance_km: Option<f64>,
    pub is_complete: bool,
    pub start_time: DateTime<Utc>,
}

impl GameSession {
    pub fn new(id: String, user_id: String, location: Location) -> Self {
        Self {
            id,
            user_id,
            location_id: location.id,
            target: location.coordinate,
            score: 0,
            distance_km: None,
            is_complete: false,
            start_time: Utc::now(),
        }
    }
}

/// Handle returned when a round begins or resumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedGame {
    pub game_session_id: String,
    pub image_id: String,
}

impl From<&GameSession> for StartedGame {
    fn from(session: &GameSession) -> Self {
        Self {
            game_session_id: session.id.clone(),
            image_id: session.location_id.clone(),
        }
    }
}
