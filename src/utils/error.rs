use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid coordinate for '{field}': {value}")]
    InvalidCoordinate { field: String, value: String },

    #[error("Game session not found: {game_id}")]
    SessionNotFound { game_id: String },

    #[error("Game session already complete: {game_id}")]
    SessionAlreadyComplete { game_id: String },

    #[error("Multiple incomplete game sessions found for user {user_id}")]
    MultipleActiveSessions { user_id: String },

    #[error("No location found to start the game")]
    NoLocationFound,

    #[error("Distance computation produced a non-finite value")]
    NonFiniteDistance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Input,
    Session,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GameError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GameError::ApiError(_) | GameError::NoLocationFound => ErrorCategory::Network,
            GameError::CsvError(_) | GameError::SerializationError(_) | GameError::IoError(_) => {
                ErrorCategory::Data
            }
            GameError::ConfigError { .. }
            | GameError::InvalidConfigValueError { .. }
            | GameError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GameError::InvalidCoordinate { .. } => ErrorCategory::Input,
            GameError::SessionNotFound { .. }
            | GameError::SessionAlreadyComplete { .. }
            | GameError::MultipleActiveSessions { .. } => ErrorCategory::Session,
            GameError::NonFiniteDistance => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GameError::SessionAlreadyComplete { .. } => ErrorSeverity::Low,
            GameError::ApiError(_) | GameError::NoLocationFound => ErrorSeverity::Medium,
            GameError::NonFiniteDistance | GameError::MultipleActiveSessions { .. } => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit status for a failed command. Never 0.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Medium
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GameError::ApiError(_) => "Could not reach the imagery provider".to_string(),
            GameError::NoLocationFound => {
                "No street-level imagery was found for a new round".to_string()
            }
            GameError::CsvError(e) => format!("Could not read or write CSV data: {}", e),
            GameError::IoError(e) => format!("File operation failed: {}", e),
            GameError::SerializationError(e) => format!("Could not encode output: {}", e),
            GameError::ConfigError { message } => format!("Configuration problem: {}", message),
            GameError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            GameError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            GameError::InvalidCoordinate { field, value } => {
                format!("'{}' is not a valid coordinate for {}", value, field)
            }
            GameError::SessionNotFound { .. } => "That game could not be found".to_string(),
            GameError::SessionAlreadyComplete { .. } => {
                "That game already has a guess; start a new one".to_string()
            }
            GameError::MultipleActiveSessions { .. } => {
                "Your account has more than one game in progress".to_string()
            }
            GameError::NonFiniteDistance => "The guess could not be scored".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network and the Mapillary access token, then retry",
            ErrorCategory::Data => "Check the input file format and permissions",
            ErrorCategory::Configuration => "Fix the configuration file or command-line arguments",
            ErrorCategory::Input => {
                "Latitude must be within [-90, 90] and longitude within [-180, 180]"
            }
            ErrorCategory::Session => "Start a new game",
            ErrorCategory::Internal => "Report this issue with the coordinates that triggered it",
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
