use secrecy::{ExposeSecret, Secret};
use service_core::error::AppError;

/// Prefix every completion API key carries.
pub const API_KEY_PREFIX: &str = "sk-ant";

/// Check the configured completion credential before any upstream call.
pub fn require_api_key(api_key: Option<&Secret<String>>) -> Result<&Secret<String>, AppError> {
    let Some(key) = api_key.filter(|k| !k.expose_secret().is_empty()) else {
        tracing::error!("Completion API key is not configured");
        return Err(AppError::config(
            "API key not configured",
            "ANTHROPIC_API_KEY environment variable is missing",
        ));
    };

    if !key.expose_secret().starts_with(API_KEY_PREFIX) {
        tracing::error!(
            key_len = key.expose_secret().len(),
            "Completion API key has an unexpected format"
        );
        return Err(AppError::config(
            "Invalid API key format",
            format!("API key should start with {}", API_KEY_PREFIX),
        ));
    }

    Ok(key)
}
