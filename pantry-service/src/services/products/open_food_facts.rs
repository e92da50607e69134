//! Primary product database: Open Food Facts (no key required).

use super::category::classify_tags;
use super::{fetch_json, non_empty, ProductSource};
use crate::dtos::Product;
use crate::services::metrics::{record_upstream, UpstreamOutcome};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const UPSTREAM: &str = "open_food_facts";

#[derive(Debug, Deserialize)]
struct OffResponse {
    #[serde(default)]
    status: Option<serde_json::Value>,
    #[serde(default)]
    product: Option<OffProduct>,
}

#[derive(Debug, Default, Deserialize)]
struct OffProduct {
    product_name: Option<String>,
    generic_name: Option<String>,
    brands: Option<String>,
    categories_tags: Option<Vec<String>>,
    image_url: Option<String>,
}

impl OffProduct {
    fn into_product(self, barcode: &str) -> Product {
        let category = classify_tags(self.categories_tags.as_deref().unwrap_or_default());
        Product {
            name: non_empty(self.product_name)
                .or_else(|| non_empty(self.generic_name))
                .unwrap_or_else(|| format!("Product {}", barcode)),
            brand: self.brands.unwrap_or_default(),
            category,
            image: non_empty(self.image_url),
        }
    }
}

pub struct OpenFoodFactsSource {
    client: Client,
    base_url: String,
}

impl OpenFoodFactsSource {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn product_url(&self, barcode: &str) -> String {
        format!(
            "{}/api/v2/product/{}.json",
            self.base_url,
            urlencoding::encode(barcode)
        )
    }
}

#[async_trait]
impl ProductSource for OpenFoodFactsSource {
    fn name(&self) -> &'static str {
        UPSTREAM
    }

    async fn lookup(&self, barcode: &str) -> Option<Product> {
        let body: OffResponse =
            fetch_json(UPSTREAM, self.client.get(self.product_url(barcode))).await?;

        let found = body.status.as_ref().and_then(|s| s.as_i64()) == Some(1);
        match body.product {
            Some(product) if found => {
                record_upstream(UPSTREAM, UpstreamOutcome::Success);
                Some(product.into_product(barcode))
            }
            _ => {
                record_upstream(UPSTREAM, UpstreamOutcome::Miss);
                None
            }
        }
    }
}
