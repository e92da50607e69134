use crate::dtos::{BarcodeRequest, LookupResponse};
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{extract::State, Json};

/// Resolve a barcode through the product source chain.
///
/// A barcode nobody knows is still a 200 with `success: false`.
pub async fn lookup_barcode(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<BarcodeRequest>,
) -> Json<LookupResponse> {
    let barcode = req.barcode.unwrap_or_default();

    tracing::info!(barcode = %barcode, "Looking up barcode");

    Json(state.products.resolve(&barcode).await)
}
