use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardioError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load model from '{path}': {message}")]
    ModelLoadError { path: String, message: String },

    #[error("Invalid model artifact: {message}")]
    InvalidModelError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Scoring error: {message}")]
    ScoringError { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Model,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CardioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CardioError::ConfigError { .. } | CardioError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CardioError::ModelLoadError { .. }
            | CardioError::InvalidModelError { .. }
            | CardioError::ScoringError { .. } => ErrorCategory::Model,
            CardioError::SerializationError(_)
            | CardioError::CsvError(_)
            | CardioError::ValidationError { .. } => ErrorCategory::Data,
            CardioError::IoError(_) | CardioError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 請求內容錯誤由呼叫端修正
            CardioError::ValidationError { .. } => ErrorSeverity::Low,
            // 單筆評分失敗只影響該請求
            CardioError::ScoringError { .. } => ErrorSeverity::Medium,
            CardioError::SerializationError(_) | CardioError::CsvError(_) => ErrorSeverity::High,
            CardioError::ConfigError { .. } | CardioError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            CardioError::ModelLoadError { .. }
            | CardioError::InvalidModelError { .. }
            | CardioError::IoError(_)
            | CardioError::ServerError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CardioError::ModelLoadError { path, .. } => format!(
                "Check that the model artifact exists at '{}' and is readable",
                path
            ),
            CardioError::InvalidModelError { .. } => {
                "Re-export the model artifact from the training toolchain".to_string()
            }
            CardioError::ValidationError { .. } => {
                "Send a JSON body with all 12 patient fields and their declared types".to_string()
            }
            CardioError::ScoringError { .. } => {
                "Check the request values for extreme or non-physical measurements".to_string()
            }
            CardioError::ConfigError { .. } => {
                "Make sure the configuration file exists and is valid TOML".to_string()
            }
            CardioError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the config file or CLI flags", field)
            }
            CardioError::CsvError(_) => {
                "Check that the CSV header names all 12 patient columns".to_string()
            }
            CardioError::SerializationError(_) => "Check the JSON document format".to_string(),
            CardioError::IoError(_) => "Check file paths and permissions".to_string(),
            CardioError::ServerError { .. } => {
                "Check that the listen address is free and reachable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CardioError::ModelLoadError { path, .. } => {
                format!("Could not load the prediction model ({})", path)
            }
            CardioError::InvalidModelError { message } => {
                format!("The prediction model is not usable: {}", message)
            }
            CardioError::ValidationError { message } => {
                format!("Invalid patient record: {}", message)
            }
            CardioError::ScoringError { .. } => "The model could not score this record".to_string(),
            CardioError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CardioError>;
