//! Barcode resolution across an ordered chain of product databases.

pub mod category;
pub mod open_food_facts;
pub mod upc_item_db;

use crate::dtos::{LookupResponse, Product};
use crate::services::metrics::{record_upstream, UpstreamOutcome};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub use open_food_facts::OpenFoodFactsSource;
pub use upc_item_db::UpcItemDbSource;

/// One product database that may know a barcode.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Label used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Resolve a barcode. Failures of any kind are reported as `None`.
    async fn lookup(&self, barcode: &str) -> Option<Product>;
}

/// Queries sources strictly in order and stops at the first hit.
#[derive(Clone)]
pub struct ProductResolver {
    sources: Vec<Arc<dyn ProductSource>>,
}

impl ProductResolver {
    pub fn new(sources: Vec<Arc<dyn ProductSource>>) -> Self {
        Self { sources }
    }

    pub async fn resolve(&self, barcode: &str) -> LookupResponse {
        for source in &self.sources {
            if let Some(product) = source.lookup(barcode).await {
                tracing::info!(
                    source = source.name(),
                    barcode = %barcode,
                    name = %product.name,
                    category = ?product.category,
                    "Product found"
                );
                return LookupResponse {
                    success: true,
                    product,
                };
            }
            tracing::info!(source = source.name(), barcode = %barcode, "Product not found, trying next source");
        }

        tracing::info!(barcode = %barcode, "Product not found in any database");
        LookupResponse {
            success: false,
            product: Product::unknown(barcode),
        }
    }
}

/// Send a lookup request and decode its JSON body.
///
/// Returns `None` on transport errors, non-success statuses and bodies that
/// do not decode. A 404 is an ordinary miss; everything else is recorded as
/// an upstream error.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    upstream: &'static str,
    request: reqwest::RequestBuilder,
) -> Option<T> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(upstream, error = %e, "Product lookup request failed");
            record_upstream(upstream, UpstreamOutcome::Error);
            return None;
        }
    };

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        record_upstream(upstream, UpstreamOutcome::Miss);
        return None;
    }
    if !status.is_success() {
        tracing::warn!(upstream, status = status.as_u16(), "Product lookup returned error status");
        record_upstream(upstream, UpstreamOutcome::Error);
        return None;
    }

    match response.json::<T>().await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!(upstream, error = %e, "Product lookup returned unreadable body");
            record_upstream(upstream, UpstreamOutcome::Error);
            None
        }
    }
}

/// `Some(value)` unless the value is empty.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
