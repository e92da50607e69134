pub mod barcode;
pub mod recipes;

pub use barcode::{BarcodeRequest, Category, LookupResponse, Product};
pub use recipes::{PantryItem, RecipeGenerationRequest, RecipeSearchRequest, SearchResponse};
