//! Prometheus exposition for pantry-service.
//!
//! Request metrics come from `service_core::middleware::metrics`; this module
//! installs the recorder they are written to and adds upstream call counters.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Outcome label for a single upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOutcome {
    Success,
    /// The upstream answered but had nothing for us.
    Miss,
    /// Transport failure, unexpected status or unparseable body.
    Error,
}

impl UpstreamOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamOutcome::Success => "success",
            UpstreamOutcome::Miss => "miss",
            UpstreamOutcome::Error => "error",
        }
    }
}

/// Install the global recorder. Safe to call more than once.
pub fn init_metrics() {
    HANDLE.get_or_init(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("Failed to install Prometheus recorder: {}", e);
            panic!("Failed to initialize metrics: {}", e);
        }
    });
}

pub fn get_metrics() -> String {
    match HANDLE.get() {
        Some(handle) => handle.render(),
        None => {
            tracing::error!("Metrics recorder not initialized");
            "# Metrics recorder not initialized\n".to_string()
        }
    }
}

pub fn record_upstream(upstream: &'static str, outcome: UpstreamOutcome) {
    counter!(
        "upstream_requests_total",
        "upstream" => upstream,
        "outcome" => outcome.as_str()
    )
    .increment(1);
}
