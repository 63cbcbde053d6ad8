use thiserror::Error;

/// Main error type for gymhuntr-cli
#[derive(Error, Debug)]
pub enum HuntrError {
    #[error("Rate limited by the API. Please wait before retrying.")]
    RateLimited,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Malformed gym record: {0}")]
    MalformedRecord(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, HuntrError>;

impl HuntrError {
    /// Create a configuration error from a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid response error from a message
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a malformed record error from a message
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    /// Create an invalid parameter error from a message
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Format an error for display at the CLI boundary
pub fn format_user_error(err: &HuntrError) -> String {
    match err {
        HuntrError::Http(e) if e.is_timeout() => {
            format!("Request timed out: {}", e)
        }
        HuntrError::Http(e) if e.is_connect() => {
            format!("Could not reach the API: {}", e)
        }
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HuntrError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error 503: unavailable");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = HuntrError::RateLimited;
        assert!(err.to_string().contains("Rate limited"));
    }

    #[test]
    fn test_error_constructors() {
        let config_err = HuntrError::config("test config");
        assert!(matches!(config_err, HuntrError::Config(_)));

        let response_err = HuntrError::invalid_response("bad response");
        assert!(matches!(response_err, HuntrError::InvalidResponse(_)));

        let record_err = HuntrError::malformed("bad record");
        assert!(matches!(record_err, HuntrError::MalformedRecord(_)));

        let param_err = HuntrError::invalid_param("bad param");
        assert!(matches!(param_err, HuntrError::InvalidParameter(_)));
    }

    #[test]
    fn test_format_user_error_passthrough() {
        let err = HuntrError::Database("locked".to_string());
        assert_eq!(format_user_error(&err), "Database error: locked");
    }
}
