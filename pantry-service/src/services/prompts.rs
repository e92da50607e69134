//! Prompt text sent to the completion API.
//!
//! The search template's section markers are parsed by the client app, so
//! the wording below is part of the public contract.

use crate::dtos::PantryItem;

pub const GENERATE_MAX_TOKENS: u32 = 1500;
pub const SEARCH_MAX_TOKENS: u32 = 2000;

/// Placeholder used when the caller has nothing in the pantry.
pub const EMPTY_PANTRY: &str = "none";

pub fn generation_prompt(item_list: &str) -> String {
    format!(
        "I have these ingredients in my pantry: {item_list}. \n\
         \n\
         Please suggest 3 creative recipes I can make, prioritizing ingredients that expire soonest. For each recipe:\n\
         - Give it a catchy name\n\
         - List ingredients needed (highlighting what I already have)\n\
         - Brief cooking steps\n\
         - Estimated time\n\
         \n\
         Keep it concise and practical!"
    )
}

/// Comma separated item names, or [`EMPTY_PANTRY`].
pub fn pantry_list(items: Option<&[PantryItem]>) -> String {
    match items {
        Some(items) if !items.is_empty() => items
            .iter()
            .map(|item| item.name.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", "),
        _ => EMPTY_PANTRY.to_string(),
    }
}

pub fn search_prompt(query: &str, pantry: &str) -> String {
    format!(
        "Find 5 recipes for: {query}\n\
         \n\
         I have these items in my pantry: {pantry}\n\
         \n\
         For each recipe, format EXACTLY like this (no markdown symbols):\n\
         \n\
         RECIPE_START\n\
         Name: [Recipe Name]\n\
         Servings: [number]\n\
         Time: [X minutes]\n\
         \n\
         Ingredients:\n\
         [Amount] [ingredient name]\n\
         [Amount] [ingredient name]\n\
         [Amount] [ingredient name]\n\
         \n\
         Instructions:\n\
         1. [First step]\n\
         2. [Second step]\n\
         3. [Third step]\n\
         \n\
         RECIPE_END\n\
         \n\
         Provide 5 different recipes. Use plain text only, no markdown symbols."
    )
}
