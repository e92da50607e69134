use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use validator::Validate;

/// JSON body extractor that runs `validator` rules before the handler sees the value.
///
/// The content type is not enforced and an empty body reads as `{}`, so a
/// request without a body fails on its required fields (400) instead of on
/// framing.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| AppError::BadRequest {
            error: "Failed to read request body".to_string(),
            details: Some(e.to_string()),
        })?;

        let value: T = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_slice(b"{}")
        } else {
            serde_json::from_slice(&bytes)
        }
        .map_err(|e| AppError::BadRequest {
            error: "Invalid JSON body".to_string(),
            details: Some(e.to_string()),
        })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
