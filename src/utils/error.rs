use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    ApiStatus { status: u16, message: String },

    #[error("Unexpected response shape: {message}")]
    ResponseShape { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Clipboard error: {message}")]
    ClipboardError { message: String },

    #[error("No API key stored")]
    MissingApiKey,
}

impl WidgetError {
    /// Short message suitable for a status line or terminal output.
    pub fn user_friendly_message(&self) -> String {
        match self {
            WidgetError::ApiError(_) => "Could not reach the AI service".to_string(),
            WidgetError::ApiStatus { status, message } => {
                format!("The AI service rejected the request ({}): {}", status, message)
            }
            WidgetError::ResponseShape { .. } => {
                "The AI service returned an unexpected response".to_string()
            }
            WidgetError::MissingApiKey => "Add an API key to start chatting".to_string(),
            WidgetError::ConfigError { .. } | WidgetError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
