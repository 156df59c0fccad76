use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cannot canonicalize {input:?}: {reason}")]
    CanonicalizeError { input: String, reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::SerializationError(_)
            | EtlError::CanonicalizeError { .. }
            | EtlError::ValidationError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::CanonicalizeError { .. } => ErrorSeverity::Medium,
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ValidationError { .. }
            | EtlError::SerializationError(_) => ErrorSeverity::High,
            EtlError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::IoError(e) => format!("Could not read or write a file: {}", e),
            EtlError::SerializationError(e) => format!("Could not render the dataset: {}", e),
            EtlError::ConfigError { message } => format!("Invalid configuration: {}", message),
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            EtlError::CanonicalizeError { input, reason } => {
                format!("Feed entry {:?} could not be normalized: {}", input, reason)
            }
            EtlError::ValidationError { message } => format!("Validation failed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::IoError(_) => {
                "Check that the source file exists and the destination directory is writable"
            }
            EtlError::SerializationError(_) => "Re-run with --verbose and report the failing input",
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Check the -s/-d arguments and the TOML config file"
            }
            EtlError::CanonicalizeError { .. } => {
                "Fix or remove the entry, or run without --strict to skip it"
            }
            EtlError::ValidationError { .. } => "Check the command line arguments",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
