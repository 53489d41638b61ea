use crate::adapters::mapillary::MapillaryConfig;
use crate::core::scoring::ScoringParams;
use crate::utils::error::{GameError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub scoring: ScoringSection,
    pub mapillary: MapillaryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSection {
    pub max_score: u32,
    pub penalty_per_km: f64,
}

impl Default for ScoringSection {
    fn default() -> Self {
        let params = ScoringParams::default();
        Self {
            max_score: params.max_score,
            penalty_per_km: params.penalty_per_km,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex"))
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GameError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GameError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables stay verbatim.
    pub fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams {
            max_score: self.scoring.max_score,
            penalty_per_km: self.scoring.penalty_per_km,
        }
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        LogFormat::parse(&self.logging.format).ok_or_else(|| GameError::InvalidConfigValueError {
            field: "logging.format".to_string(),
            value: self.logging.format.clone(),
            reason: "Valid formats: compact, json".to_string(),
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.scoring_params().validate()?;
        self.mapillary.validate()?;
        self.log_format()?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(GameError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Valid levels: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }
}
