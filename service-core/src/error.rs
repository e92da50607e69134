use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Maximum number of characters of diagnostic text echoed back to callers.
pub const MAX_DETAILS_LEN: usize = 500;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {error}")]
    BadRequest {
        error: String,
        details: Option<String>,
    },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Configuration error: {error}")]
    ConfigError {
        error: String,
        message: Option<String>,
    },

    #[error("Upstream error ({status}): {error}")]
    UpstreamError {
        status: u16,
        error: String,
        details: Option<String>,
    },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(error: impl Into<String>) -> Self {
        AppError::BadRequest {
            error: error.into(),
            details: None,
        }
    }

    pub fn config(error: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ConfigError {
            error: error.into(),
            message: Some(message.into()),
        }
    }

    /// HTTP status this error renders with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::ConfigError { .. } | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::UpstreamError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError {
            error: "Configuration error".to_string(),
            message: Some(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Truncate `text` to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// First human-readable message out of a set of field validation failures.
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, errs) in fields {
        if let Some(err) = errs.first() {
            return match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            };
        }
    }

    "Validation error".to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            message: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = match self {
            AppError::ValidationError(err) => ErrorResponse {
                error: first_validation_message(&err),
                message: None,
                details: None,
            },
            AppError::BadRequest { error, details } => ErrorResponse {
                error,
                message: None,
                details,
            },
            AppError::MethodNotAllowed => ErrorResponse {
                error: "Method not allowed".to_string(),
                message: None,
                details: None,
            },
            AppError::ConfigError { error, message } => ErrorResponse {
                error,
                message,
                details: None,
            },
            AppError::UpstreamError { error, details, .. } => ErrorResponse {
                error,
                message: None,
                details,
            },
            AppError::InternalError(err) => ErrorResponse {
                error: "Internal server error".to_string(),
                message: Some(err.to_string()),
                details: Some(truncate_chars(&format!("{:#?}", err), MAX_DETAILS_LEN)),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[derive(Validate)]
    struct Named {
        #[validate(required(message = "Name is required"))]
        name: Option<String>,
    }

    #[tokio::test]
    async fn validation_error_uses_field_message() {
        let err = Named { name: None }.validate().unwrap_err();
        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "error": "Name is required" }));
    }

    #[tokio::test]
    async fn upstream_error_keeps_upstream_status() {
        let response = AppError::UpstreamError {
            status: 429,
            error: "rate limited".to_string(),
            details: Some("{}".to_string()),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = body_json(response).await;
        assert_eq!(body["error"], "rate limited");
        assert_eq!(body["details"], "{}");
    }

    #[test]
    fn invalid_upstream_status_falls_back_to_500() {
        let err = AppError::UpstreamError {
            status: 42,
            error: "odd".to_string(),
            details: None,
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn config_error_renders_message() {
        let response = AppError::config("API key not configured", "missing").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "API key not configured");
        assert_eq!(body["message"], "missing");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn internal_error_truncates_details() {
        let long = "x".repeat(2000);
        let response = AppError::InternalError(anyhow::anyhow!(long)).into_response();

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body["details"].as_str().unwrap().chars().count() <= MAX_DETAILS_LEN);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
