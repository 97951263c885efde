use thiserror::Error;

#[derive(Debug, Error)]
pub enum DentalError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Permission error: {0}")]
    Permission(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chat assistant unavailable: {0}")]
    ChatUnavailable(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DentalError {
    /// Stable tag used in log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            DentalError::InvalidArgument(_) => "InvalidArgumentError",
            DentalError::NotFound(_) => "NotFoundError",
            DentalError::Authentication(_) => "AuthenticationError",
            DentalError::Permission(_) => "PermissionError",
            DentalError::Config(_) => "ConfigError",
            DentalError::ChatUnavailable(_) => "ChatUnavailableError",
            DentalError::LLMApi(_) => "LLMApiError",
            DentalError::RateLimit(_) => "RateLimitError",
            DentalError::Network(_) => "NetworkError",
            DentalError::Io(_) => "IoError",
            DentalError::Json(_) => "JsonError",
            DentalError::Yaml(_) => "YamlError",
            DentalError::Internal(_) => "InternalError",
        }
    }
}
