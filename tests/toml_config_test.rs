use geo_guess::adapters::mapillary::BboxStrategy;
use geo_guess::utils::logger::LogFormat;
use geo_guess::utils::validation::Validate;
use geo_guess::{GameError, TomlConfig};
use tempfile::TempDir;

#[test]
fn test_load_full_config_with_env_substitution() {
    std::env::set_var("GEO_GUESS_TEST_TOKEN", "secret-token");

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("geo-guess.toml");
    std::fs::write(
        &path,
        r#"
[scoring]
max_score = 1000
penalty_per_km = 10.0

[mapillary]
endpoint = "https://graph.mapillary.com"
access_token = "${GEO_GUESS_TEST_TOKEN}"
bbox_strategy = "random"
search_offset_degrees = 0.05
max_attempts = 4
timeout_seconds = 3

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = TomlConfig::from_file(&path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.mapillary.access_token.as_deref(), Some("secret-token"));
    assert_eq!(
        config.mapillary.resolved_access_token().as_deref(),
        Some("secret-token")
    );
    assert_eq!(config.mapillary.bbox_strategy, BboxStrategy::Random);
    assert_eq!(config.mapillary.max_attempts, 4);
    assert_eq!(config.log_format().unwrap(), LogFormat::Json);
    assert_eq!(config.scoring_params().zero_score_distance_km(), 100.0);
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = TomlConfig::from_file(temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, GameError::IoError(_)));
}

#[test]
fn test_bad_endpoint_fails_validation() {
    let config = TomlConfig::from_toml_str(
        r#"
[mapillary]
endpoint = "ftp://graph.mapillary.com"
"#,
    )
    .unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, GameError::InvalidConfigValueError { ref field, .. } if field == "mapillary.endpoint"));
}

#[test]
fn test_bad_log_level_fails_validation() {
    let config = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_wrong_type_is_config_error() {
    let err = TomlConfig::from_toml_str("[scoring]\nmax_score = \"lots\"").unwrap_err();
    assert!(matches!(err, GameError::ConfigError { .. }));
}
