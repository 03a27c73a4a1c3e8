use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RoastError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),
}

impl RoastError {
    /// The underlying message, without the category prefix.
    pub fn detail(&self) -> &str {
        match self {
            RoastError::ValidationError(msg)
            | RoastError::ApiError(msg)
            | RoastError::ParseError(msg)
            | RoastError::ConfigError(msg)
            | RoastError::NetworkError(msg)
            | RoastError::Unauthorized(msg)
            | RoastError::ToolNotFound(msg) => msg,
        }
    }
}

impl From<reqwest::Error> for RoastError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            RoastError::NetworkError(err.to_string())
        } else if err.is_decode() {
            RoastError::ParseError(err.to_string())
        } else {
            RoastError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RoastError {
    fn from(err: serde_json::Error) -> Self {
        RoastError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for RoastError {
    fn from(err: std::io::Error) -> Self {
        RoastError::ConfigError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for RoastError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        RoastError::Unauthorized(err.to_string())
    }
}

impl ResponseError for RoastError {
    fn status_code(&self) -> StatusCode {
        // Tool and provider failures travel inside JSON-RPC bodies; only the
        // auth extractor turns a RoastError into an HTTP status.
        match self {
            RoastError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            RoastError::Unauthorized(msg) => HttpResponse::Unauthorized()
                .insert_header((
                    header::WWW_AUTHENTICATE,
                    format!("Bearer error=\"invalid_token\", error_description=\"{msg}\""),
                ))
                .json(json!({
                    "error": "invalid_token",
                    "error_description": msg,
                })),
            _ => HttpResponse::build(self.status_code()).body(self.to_string()),
        }
    }
}
