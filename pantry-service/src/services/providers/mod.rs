//! Completion API abstraction.
//!
//! Handlers depend on [`CompletionProvider`] so the upstream vendor stays
//! behind one seam; [`anthropic::AnthropicProvider`] is the production
//! implementation.

pub mod anthropic;

use async_trait::async_trait;
use secrecy::Secret;
use serde::Serialize;
use thiserror::Error;

pub use anthropic::AnthropicProvider;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The upstream answered with a non-success status; body kept verbatim.
    #[error("Upstream returned status {status}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Request envelope sent to the completion API.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    /// Single-turn request carrying one user prompt.
    pub fn user_prompt(model: &str, max_tokens: u32, prompt: String) -> Self {
        Self {
            model: model.to_string(),
            max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
        }
    }
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Model identifier placed in every request.
    fn model(&self) -> &str;

    /// Send one completion request and return the upstream JSON envelope untouched.
    async fn complete(
        &self,
        api_key: &Secret<String>,
        request: &CompletionRequest,
    ) -> Result<serde_json::Value, ProviderError>;
}

/// Concatenate the `text` of every content block, newline separated.
///
/// Returns `None` when the envelope has no `content` array.
pub fn joined_text(envelope: &serde_json::Value) -> Option<String> {
    let blocks = envelope.get("content")?.as_array()?;
    Some(
        blocks
            .iter()
            .map(|block| block.get("text").and_then(|t| t.as_str()).unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Best-effort `error.message` out of an upstream error body.
pub fn upstream_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
