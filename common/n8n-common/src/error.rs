//! Error types for n8n API operations
//!
//! Every failure the client can surface is fatal to the current command.
//! Nothing here is retried.

use thiserror::Error;

/// Errors that can occur when talking to the n8n REST API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid configuration (e.g. no API key)
    #[error("{0}")]
    Config(String),

    /// The request never produced a response (connect, timeout, TLS...)
    #[error("request to {url} failed: {source}")]
    Request {
        /// Full URL of the failed request
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{status} from {url}\nResponse: {body}")]
    Status {
        /// HTTP status returned by the server
        status: reqwest::StatusCode,
        /// Full URL of the failed request
        url: String,
        /// Server-provided error body (pretty JSON when it parsed)
        body: String,
    },

    /// The response body was not valid JSON
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Full URL of the request
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Build a `Status` error, pretty-printing the body when it is JSON
    pub fn status(status: reqwest::StatusCode, url: impl Into<String>, body: &str) -> Self {
        let body = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()),
            Err(_) => body.to_string(),
        };
        ApiError::Status {
            status,
            url: url.into(),
            body,
        }
    }

    /// Missing API key configuration error
    pub fn missing_api_key() -> Self {
        ApiError::Config(
            "N8N_API_KEY not set (use --key, the N8N_API_KEY environment variable or .n8n.toml)"
                .to_string(),
        )
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_error_pretty_prints_json_body() {
        let err = ApiError::status(
            StatusCode::NOT_FOUND,
            "http://localhost:5678/api/v1/workflows/9",
            r#"{"message":"Not Found"}"#,
        );
        let text = err.to_string();
        assert!(text.starts_with("404 Not Found"));
        assert!(text.contains("\"message\": \"Not Found\""));
        match err {
            ApiError::Status { status, .. } => assert_eq!(status, StatusCode::NOT_FOUND),
            other => panic!("Expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_status_error_keeps_text_body() {
        let err = ApiError::status(StatusCode::BAD_GATEWAY, "http://x", "upstream down");
        assert!(err.to_string().ends_with("Response: upstream down"));
    }

    #[test]
    fn test_missing_api_key_message() {
        let err = ApiError::missing_api_key();
        assert!(err.to_string().contains("N8N_API_KEY not set"));
        assert!(matches!(err, ApiError::Config(_)));
    }
}
