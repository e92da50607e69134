use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct BarcodeRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(
        required(message = "Barcode is required"),
        length(min = 1, message = "Barcode is required")
    )]
    pub barcode: Option<String>,
}

/// Scanners often hand barcodes over as JSON numbers; accept both.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Meat,
    Dairy,
    Produce,
    Frozen,
    Pantry,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub image: Option<String>,
}

impl Product {
    /// Placeholder returned when no product source knows the barcode.
    pub fn unknown(barcode: &str) -> Self {
        Self {
            name: format!("Unknown Product {}", barcode),
            brand: String::new(),
            category: Category::Other,
            image: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub success: bool,
    pub product: Product,
}
