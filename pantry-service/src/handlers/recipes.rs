use crate::dtos::{RecipeGenerationRequest, RecipeSearchRequest, SearchResponse};
use crate::services::credentials::require_api_key;
use crate::services::prompts::{
    generation_prompt, pantry_list, search_prompt, GENERATE_MAX_TOKENS, SEARCH_MAX_TOKENS,
};
use crate::services::providers::{
    joined_text, upstream_error_message, CompletionRequest, ProviderError,
};
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{extract::State, Json};
use service_core::error::{truncate_chars, AppError, MAX_DETAILS_LEN};

const GENERATE_FAILED: &str = "Failed to generate recipes";
const SEARCH_FAILED: &str = "Failed to search recipes";

/// Ask the completion API for three recipes built from the caller's pantry.
///
/// The upstream envelope is returned as-is; the client reads `content[].text`.
pub async fn generate_recipes(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RecipeGenerationRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let item_list = req.item_list.unwrap_or_default();
    let api_key = require_api_key(state.config.anthropic.api_key.as_ref())?;

    let request = CompletionRequest::user_prompt(
        state.completion.model(),
        GENERATE_MAX_TOKENS,
        generation_prompt(&item_list),
    );

    let envelope = state
        .completion
        .complete(api_key, &request)
        .await
        .map_err(|e| match e {
            ProviderError::Upstream { status, body } => AppError::UpstreamError {
                status,
                error: upstream_error_message(&body).unwrap_or_else(|| GENERATE_FAILED.to_string()),
                details: Some(truncate_chars(&body, MAX_DETAILS_LEN)),
            },
            other => AppError::InternalError(anyhow::Error::new(other).context(GENERATE_FAILED)),
        })?;

    tracing::info!(
        content_blocks = envelope
            .get("content")
            .and_then(|c| c.as_array())
            .map(|c| c.len())
            .unwrap_or(0),
        "Generated recipes"
    );

    Ok(Json(envelope))
}

/// Search for five recipes matching a free-text query, in the plain-text
/// `RECIPE_START`/`RECIPE_END` template the client parses.
pub async fn search_recipes(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RecipeSearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = req.query.unwrap_or_default();
    let api_key = require_api_key(state.config.anthropic.api_key.as_ref())?;

    tracing::info!(query = %query, "Searching for recipes");

    let pantry = pantry_list(req.pantry_items.as_deref());
    let request = CompletionRequest::user_prompt(
        state.completion.model(),
        SEARCH_MAX_TOKENS,
        search_prompt(&query, &pantry),
    );

    let envelope = state
        .completion
        .complete(api_key, &request)
        .await
        .map_err(|e| match e {
            ProviderError::Upstream { status, body } => AppError::UpstreamError {
                status,
                error: SEARCH_FAILED.to_string(),
                details: Some(body),
            },
            other => AppError::InternalError(anyhow::Error::new(other).context(SEARCH_FAILED)),
        })?;

    let recipes = joined_text(&envelope).ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!(
            "Completion response has no content blocks"
        ))
    })?;

    Ok(Json(SearchResponse {
        success: true,
        recipes,
    }))
}
