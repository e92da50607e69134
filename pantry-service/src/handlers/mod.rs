pub mod barcode;
pub mod health;
pub mod metrics;
pub mod recipes;

pub use barcode::lookup_barcode;
pub use health::health_check;
pub use recipes::{generate_recipes, search_recipes};

use axum::http::StatusCode;
use service_core::error::AppError;

/// CORS preflight: always 200 with an empty body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
