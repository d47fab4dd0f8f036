use thiserror::Error;

#[derive(Error, Debug)]
pub enum TurfbookError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{message}")]
    ServerError { status: u16, message: String },

    #[error("{resource} not found")]
    NotFoundError { resource: String },

    #[error("Authentication required")]
    UnauthorizedError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Remote,
    Storage,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TurfbookError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ApiError(_)
            | Self::ServerError { .. }
            | Self::NotFoundError { .. }
            | Self::UnauthorizedError => ErrorCategory::Remote,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::ServerError { .. } | Self::NotFoundError { .. } | Self::UnauthorizedError => {
                ErrorSeverity::Medium
            }
            Self::ApiError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorSeverity::High
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) => format!("Could not reach the booking service: {}", e),
            Self::ServerError { message, .. } => message.clone(),
            Self::NotFoundError { resource } => format!("{} not found", resource),
            Self::UnauthorizedError => "You need to be signed in to do that".to_string(),
            Self::IoError(e) => format!("Local storage problem: {}", e),
            Self::SerializationError(e) => format!("Unexpected response format: {}", e),
            Self::ConfigError { message }
            | Self::ValidationError { message } => message.clone(),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Missing {}", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check that the booking service is running and the API URL is correct",
            Self::ServerError { .. } => "The server rejected the request; adjust your input and try again",
            Self::NotFoundError { .. } => "List venues with `turfbook venues` to find a valid id",
            Self::UnauthorizedError => "Sign in with `turfbook login` and retry",
            Self::IoError(_) => "Check permissions on the data directory",
            Self::SerializationError(_) => "The server may be running an incompatible version",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Run with --help to see valid configuration options",
            Self::ValidationError { .. } => "Fix the highlighted selection and resubmit",
        }
    }
}

pub type Result<T> = std::result::Result<T, TurfbookError>;
