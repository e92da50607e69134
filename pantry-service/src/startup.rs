//! Application startup and lifecycle management.

use crate::config::PantryConfig;
use crate::handlers::{self, method_not_allowed, preflight};
use crate::middleware::{cors_middleware, CorsPolicy};
use crate::services::{
    AnthropicProvider, CompletionProvider, OpenFoodFactsSource, ProductResolver, ProductSource,
    UpcItemDbSource,
};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: PantryConfig,
    pub completion: Arc<dyn CompletionProvider>,
    pub products: ProductResolver,
}

impl AppState {
    /// Wire the production upstream clients from configuration.
    pub fn from_config(config: PantryConfig) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("pantry-service/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.upstream_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            AppError::InternalError(anyhow::Error::new(e))
        })?;

        let completion: Arc<dyn CompletionProvider> = Arc::new(AnthropicProvider::new(
            client.clone(),
            &config.anthropic.base_url,
            &config.anthropic.model,
            &config.anthropic.api_version,
        ));

        let sources: Vec<Arc<dyn ProductSource>> = vec![
            Arc::new(OpenFoodFactsSource::new(
                client.clone(),
                &config.products.open_food_facts_url,
            )),
            Arc::new(UpcItemDbSource::new(client, &config.products.upc_item_db_url)),
        ];

        tracing::info!(
            model = %config.anthropic.model,
            api_key_configured = config.anthropic.api_key.is_some(),
            "Initialized completion provider"
        );

        Ok(Self {
            config,
            completion,
            products: ProductResolver::new(sources),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .route(
            "/api/generate-recipes",
            post(handlers::generate_recipes)
                .options(preflight)
                .fallback(method_not_allowed)
                .layer(from_fn_with_state(CorsPolicy::PERMISSIVE, cors_middleware)),
        )
        .route(
            "/api/search-recipes",
            post(handlers::search_recipes)
                .options(preflight)
                .fallback(method_not_allowed)
                .layer(from_fn_with_state(CorsPolicy::READ_POST, cors_middleware)),
        )
        .route(
            "/api/lookup-barcode",
            post(handlers::lookup_barcode)
                .options(preflight)
                .fallback(method_not_allowed)
                .layer(from_fn_with_state(CorsPolicy::READ_POST, cors_middleware)),
        )
        .route_layer(from_fn(metrics_middleware))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: PantryConfig) -> Result<Self, AppError> {
        let address = config.common.address();
        let state = AppState::from_config(config)?;

        // Port 0 binds a random port for testing.
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port, "pantry-service listening");

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
