//! Secondary product database: UPC Item DB trial endpoint.

use super::category::classify_listing;
use super::{fetch_json, non_empty, ProductSource};
use crate::dtos::Product;
use crate::services::metrics::{record_upstream, UpstreamOutcome};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const UPSTREAM: &str = "upc_item_db";

#[derive(Debug, Deserialize)]
struct UpcResponse {
    items: Option<Vec<UpcItem>>,
}

#[derive(Debug, Default, Deserialize)]
struct UpcItem {
    title: Option<String>,
    brand: Option<String>,
    category: Option<String>,
    images: Option<Vec<String>>,
}

impl UpcItem {
    fn into_product(self, barcode: &str) -> Product {
        let category = classify_listing(
            self.title.as_deref().unwrap_or_default(),
            self.category.as_deref().unwrap_or_default(),
        );
        Product {
            name: non_empty(self.title).unwrap_or_else(|| format!("Product {}", barcode)),
            brand: self.brand.unwrap_or_default(),
            category,
            image: non_empty(self.images.and_then(|images| images.into_iter().next())),
        }
    }
}

pub struct UpcItemDbSource {
    client: Client,
    base_url: String,
}

impl UpcItemDbSource {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ProductSource for UpcItemDbSource {
    fn name(&self) -> &'static str {
        UPSTREAM
    }

    async fn lookup(&self, barcode: &str) -> Option<Product> {
        let request = self
            .client
            .get(format!("{}/prod/trial/lookup", self.base_url))
            .query(&[("upc", barcode)]);
        let body: UpcResponse = fetch_json(UPSTREAM, request).await?;

        match body.items.and_then(|items| items.into_iter().next()) {
            Some(item) => {
                record_upstream(UPSTREAM, UpstreamOutcome::Success);
                Some(item.into_product(barcode))
            }
            None => {
                record_upstream(UPSTREAM, UpstreamOutcome::Miss);
                None
            }
        }
    }
}
