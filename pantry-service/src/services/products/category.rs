//! Keyword classification of looked-up products into pantry categories.

use crate::dtos::Category;

/// Rules for Open Food Facts category tags. First rule with a keyword in any tag wins.
const TAG_RULES: &[(Category, &[&str])] = &[
    (Category::Meat, &["meat", "poultry", "fish"]),
    (Category::Dairy, &["dairy", "milk", "cheese", "yogurt"]),
    (Category::Produce, &["fruit", "vegetable"]),
    (Category::Frozen, &["frozen"]),
    (Category::Pantry, &["canned", "pasta", "rice", "cereal"]),
];

/// Rules for UPC Item DB titles; anything food-like that matches none is Pantry.
const TITLE_RULES: &[(Category, &[&str])] = &[
    (Category::Meat, &["meat", "chicken", "beef", "fish"]),
    (Category::Dairy, &["milk", "cheese", "yogurt", "dairy"]),
    (Category::Produce, &["fruit", "vegetable"]),
    (Category::Frozen, &["frozen"]),
];

const FOOD_MARKER: &str = "food";

/// Classify from Open Food Facts `categories_tags` (e.g. `en:dairies`).
pub fn classify_tags<S: AsRef<str>>(tags: &[S]) -> Category {
    TAG_RULES
        .iter()
        .find(|(_, keywords)| {
            tags.iter()
                .any(|tag| keywords.iter().any(|k| tag.as_ref().contains(k)))
        })
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Classify from a UPC Item DB listing.
///
/// Only listings whose title or category mention "food" are classified at
/// all; keywords are then matched against the title alone.
pub fn classify_listing(title: &str, category: &str) -> Category {
    let title = title.to_lowercase();
    let category = category.to_lowercase();

    if !category.contains(FOOD_MARKER) && !title.contains(FOOD_MARKER) {
        return Category::Other;
    }

    TITLE_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| title.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Pantry)
}
