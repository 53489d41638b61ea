use crate::core::LocationProvider;
use crate::domain::model::{Coordinate, Location};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_float, validate_range, validate_url, Validate,
};
use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://graph.mapillary.com";
pub const ACCESS_TOKEN_ENV: &str = "MAPILLARY_ACCESS_TOKEN";

// Random centres stay away from the poles, where imagery is essentially absent.
const MAX_CENTER_LATITUDE: f64 = 85.0;

const MAX_ATTEMPTS_LIMIT: u32 = 100;
const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BboxStrategy {
    /// A small box around a random point.
    #[default]
    Random,
    /// The whole globe in one request.
    World,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapillaryConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
    pub bbox_strategy: BboxStrategy,
    pub search_offset_degrees: f64,
    pub max_attempts: u32,
    pub timeout_seconds: u64,
}

impl Default for MapillaryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
            bbox_strategy: BboxStrategy::Random,
            search_offset_degrees: 0.01,
            max_attempts: 10,
            timeout_seconds: 10,
        }
    }
}

impl MapillaryConfig {
    /// Configured token, falling back to `MAPILLARY_ACCESS_TOKEN`.
    pub fn resolved_access_token(&self) -> Option<String> {
        self.access_token
            .clone()
            .filter(|t| !t.trim().is_empty() && !t.starts_with("${"))
            .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok())
    }
}

impl Validate for MapillaryConfig {
    fn validate(&self) -> Result<()> {
        validate_url("mapillary.endpoint", &self.endpoint)?;
        validate_range("mapillary.max_attempts", self.max_attempts, 1, MAX_ATTEMPTS_LIMIT)?;
        validate_range(
            "mapillary.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_positive_float("mapillary.search_offset_degrees", self.search_offset_degrees)?;
        if let Some(token) = &self.access_token {
            validate_non_empty_string("mapillary.access_token", token)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub const WORLD: BoundingBox = BoundingBox {
        min_lon: -180.0,
        min_lat: -90.0,
        max_lon: 180.0,
        max_lat: 90.0,
    };

    pub fn around(center: Coordinate, offset: f64) -> Self {
        Self {
            min_lon: center.longitude - offset,
            min_lat: center.latitude - offset,
            max_lon: center.longitude + offset,
            max_lat: center.latitude + offset,
        }
    }

    pub fn random<R: Rng>(rng: &mut R, offset: f64) -> Self {
        let center = Coordinate::new(
            rng.gen_range(-MAX_CENTER_LATITUDE..=MAX_CENTER_LATITUDE),
            rng.gen_range(-180.0..=180.0),
        );
        Self::around(center, offset)
    }

    /// `minLon,minLat,maxLon,maxLat`, the order the Graph API expects.
    pub fn to_query(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    id: String,
    #[serde(default)]
    geometry: Option<Geometry>,
}

// GeoJSON point: coordinates are [lon, lat].
#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: [f64; 2],
}

impl ImageEntry {
    /// `None` for images the API returned without a position.
    fn into_location(self) -> Option<Location> {
        let [longitude, latitude] = self.geometry?.coordinates;
        Some(Location {
            id: self.id,
            coordinate: Coordinate::new(latitude, longitude),
        })
    }
}

pub struct MapillaryLocationProvider {
    config: MapillaryConfig,
    access_token: String,
    client: Client,
}

impl MapillaryLocationProvider {
    pub fn new(config: MapillaryConfig, access_token: String) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            config,
            access_token,
            client,
        })
    }

    fn next_bbox(&self) -> BoundingBox {
        match self.config.bbox_strategy {
            BboxStrategy::World => BoundingBox::WORLD,
            BboxStrategy::Random => {
                BoundingBox::random(&mut rand::thread_rng(), self.config.search_offset_degrees)
            }
        }
    }

    async fn fetch_in(&self, bbox: BoundingBox) -> Result<Option<Location>> {
        let url = format!("{}/images", self.config.endpoint.trim_end_matches('/'));
        tracing::debug!("Querying Mapillary images in bbox {}", bbox.to_query());

        let response = self
            .client
            .get(&url)
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("fields", "id,geometry"),
                ("bbox", bbox.to_query().as_str()),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Mapillary responded with status {}", status);
            return Ok(None);
        }

        let body: ImagesResponse = response.json().await?;
        let location = body.data.into_iter().find_map(|entry| {
            let id = entry.id.clone();
            let location = entry.into_location();
            if location.is_none() {
                tracing::debug!("Skipping image {} without geometry", id);
            }
            location
        });
        Ok(location)
    }
}

#[async_trait]
impl LocationProvider for MapillaryLocationProvider {
    async fn random_location(&self) -> Result<Option<Location>> {
        for attempt in 1..=self.config.max_attempts {
            let bbox = self.next_bbox();
            if let Some(location) = self.fetch_in(bbox).await? {
                tracing::info!(
                    "Picked image {} at ({}, {}) after {} attempt(s)",
                    location.id,
                    location.coordinate.latitude,
                    location.coordinate.longitude,
                    attempt
                );
                return Ok(Some(location));
            }
            tracing::debug!("No images in bbox on attempt {}, trying again", attempt);
        }

        tracing::warn!(
            "No imagery found after {} attempts",
            self.config.max_attempts
        );
        Ok(None)
    }
}
