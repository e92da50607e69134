pub mod credentials;
pub mod metrics;
pub mod products;
pub mod prompts;
pub mod providers;

pub use products::{OpenFoodFactsSource, ProductResolver, ProductSource, UpcItemDbSource};
pub use providers::{AnthropicProvider, CompletionProvider};
