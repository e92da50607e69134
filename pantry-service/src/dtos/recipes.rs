use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PantryItem {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeGenerationRequest {
    #[validate(
        required(message = "Item list is required"),
        length(min = 1, message = "Item list is required")
    )]
    pub item_list: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSearchRequest {
    #[validate(
        required(message = "Search query is required"),
        length(min = 1, message = "Search query is required")
    )]
    pub query: Option<String>,
    #[serde(default)]
    pub pantry_items: Option<Vec<PantryItem>>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub recipes: String,
}
