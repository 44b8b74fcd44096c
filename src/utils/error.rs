use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Trip file error ({path}): {message}")]
    TripFileError { path: String, message: String },

    #[error("Export error: {message}")]
    ExportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::ConfigValidationError { .. }
            | PlannerError::MissingConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlannerError::SerializationError(_) | PlannerError::TripFileError { .. } => {
                ErrorCategory::Input
            }
            PlannerError::ZipError(_) | PlannerError::CsvError(_) | PlannerError::ExportError { .. } => {
                ErrorCategory::Output
            }
            PlannerError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlannerError::ExportError { .. } | PlannerError::CsvError(_) => ErrorSeverity::Medium,
            PlannerError::ConfigValidationError { .. }
            | PlannerError::MissingConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::SerializationError(_)
            | PlannerError::TripFileError { .. } => ErrorSeverity::High,
            PlannerError::ZipError(_) | PlannerError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::TripFileError { path, .. } => {
                format!("Could not read the trip in '{}'", path)
            }
            PlannerError::SerializationError(_) => {
                "The trip document is not valid JSON".to_string()
            }
            PlannerError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            PlannerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            PlannerError::ConfigValidationError { message, .. } => {
                format!("Configuration could not be loaded: {}", message)
            }
            PlannerError::ExportError { message } => format!("Export failed: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the TOML config file and command-line flags"
            }
            ErrorCategory::Input => "Check that the trip file exists and matches the trip document shape",
            ErrorCategory::Output => "Check the output path and selected export formats",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
