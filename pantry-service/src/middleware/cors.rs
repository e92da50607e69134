//! Fixed CORS response headers for the public endpoints.
//!
//! Browsers call these endpoints from arbitrary origins with credentials, a
//! combination `tower_http::cors::CorsLayer` refuses to express with a
//! wildcard origin, so the headers are written directly on every response.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

pub const ALLOWED_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allow_methods: &'static str,
}

impl CorsPolicy {
    /// Advertises every common verb.
    pub const PERMISSIVE: CorsPolicy = CorsPolicy {
        allow_methods: "GET,OPTIONS,PATCH,DELETE,POST,PUT",
    };

    pub const READ_POST: CorsPolicy = CorsPolicy {
        allow_methods: "GET,OPTIONS,POST",
    };
}

pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(policy.allow_methods),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    response
}
