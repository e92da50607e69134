use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_OPEN_FOOD_FACTS_URL: &str = "https://world.openfoodfacts.org";
pub const DEFAULT_UPC_ITEM_DB_URL: &str = "https://api.upcitemdb.com";

#[derive(Debug, Clone, Deserialize)]
pub struct PantryConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub anthropic: AnthropicConfig,
    pub products: ProductLookupConfig,
    pub upstream_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("Unknown environment: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    /// Completion API credential. Absence is reported per request, not at startup.
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
    pub api_version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductLookupConfig {
    pub open_food_facts_url: String,
    pub upc_item_db_url: String,
}

impl PantryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::config("Configuration error", e))?;
        let is_prod = environment == Environment::Prod;

        let upstream_timeout_seconds = match env::var("UPSTREAM_TIMEOUT_SECONDS") {
            Ok(raw) => Some(raw.parse().map_err(|e: std::num::ParseIntError| {
                AppError::config(
                    "Configuration error",
                    format!("UPSTREAM_TIMEOUT_SECONDS is not a number: {}", e),
                )
            })?),
            Err(_) => None,
        };

        Ok(PantryConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("pantry-service"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            anthropic: AnthropicConfig {
                api_key: env::var("ANTHROPIC_API_KEY").ok().map(Secret::new),
                base_url: get_env(
                    "ANTHROPIC_BASE_URL",
                    Some(DEFAULT_ANTHROPIC_BASE_URL),
                    false,
                )?,
                model: get_env("ANTHROPIC_MODEL", Some(DEFAULT_ANTHROPIC_MODEL), false)?,
                api_version: get_env(
                    "ANTHROPIC_VERSION",
                    Some(DEFAULT_ANTHROPIC_VERSION),
                    false,
                )?,
            },
            products: ProductLookupConfig {
                open_food_facts_url: get_env(
                    "OPEN_FOOD_FACTS_URL",
                    Some(DEFAULT_OPEN_FOOD_FACTS_URL),
                    false,
                )?,
                upc_item_db_url: get_env(
                    "UPC_ITEM_DB_URL",
                    Some(DEFAULT_UPC_ITEM_DB_URL),
                    false,
                )?,
            },
            upstream_timeout_seconds,
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::config(
                    "Configuration error",
                    format!("{} is required in production but not set", key),
                ))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::config(
                    "Configuration error",
                    format!("{} is required but not set", key),
                ))
            }
        }
    }
}
