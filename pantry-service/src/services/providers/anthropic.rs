//! Anthropic Messages API provider.

use super::{CompletionProvider, CompletionRequest, ProviderError};
use crate::services::metrics::{record_upstream, UpstreamOutcome};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

const UPSTREAM: &str = "anthropic";

#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
    api_version: String,
}

impl AnthropicProvider {
    pub fn new(client: Client, base_url: &str, model: &str, api_version: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_version: api_version.to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        api_key: &Secret<String>,
        request: &CompletionRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        tracing::debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            prompt_len = request.messages.iter().map(|m| m.content.len()).sum::<usize>(),
            "Sending request to completion API"
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key.expose_secret().trim())
            .header("anthropic-version", &self.api_version)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                record_upstream(UPSTREAM, UpstreamOutcome::Error);
                ProviderError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            record_upstream(UPSTREAM, UpstreamOutcome::Error);
            ProviderError::Network(e.to_string())
        })?;

        tracing::info!(status = status.as_u16(), body_len = body.len(), "Completion API responded");

        if !status.is_success() {
            record_upstream(UPSTREAM, UpstreamOutcome::Error);
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let envelope = serde_json::from_str(&body).map_err(|e| {
            record_upstream(UPSTREAM, UpstreamOutcome::Error);
            ProviderError::InvalidResponse(e.to_string())
        })?;

        record_upstream(UPSTREAM, UpstreamOutcome::Success);
        Ok(envelope)
    }
}
