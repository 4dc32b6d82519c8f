//! Prometheus Metrics
//!
//! # Metrics
//!
//! - `policy_http_requests_total` - HTTP requests by method, route, status
//! - `policy_http_request_duration_seconds` - HTTP request duration
//! - `policy_errors_total` - Error responses by kind
//!
//! # Configuration
//!
//! - `POLICY_METRICS_ENABLED`: Enable the exporter (default: false)
//! - `POLICY_METRICS_PORT`: Exporter port (default: 9090)
//!
//! Without an installed exporter the recording calls are no-ops.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::config::parse_flag;

/// Metrics configuration
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 9090,
        }
    }
}

impl MetricsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let enabled = std::env::var("POLICY_METRICS_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.enabled);

        let port = std::env::var("POLICY_METRICS_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        Self { enabled, port }
    }
}

/// Install the Prometheus exporter. Call once at startup.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), BuildError> {
    if !config.enabled {
        tracing::info!("Metrics disabled");
        return Ok(());
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    tracing::info!("Metrics exporter listening on {}", addr);
    Ok(())
}

/// Record a request metric
pub fn record_request(method: &str, route: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];

    counter!("policy_http_requests_total", &labels).increment(1);
    histogram!("policy_http_request_duration_seconds", &labels).record(duration_secs);
}

/// Record an error response
pub fn record_error(kind: &str) {
    counter!("policy_errors_total", "kind" => kind.to_string()).increment(1);
}

/// Route template for labels; unmatched paths collapse to one value
fn route_label(matched: Option<&MatchedPath>) -> String {
    matched
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string())
}

/// Metrics middleware for tracking HTTP requests
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = route_label(request.extensions().get::<MatchedPath>());

    let response = next.run(request).await;

    record_request(
        &method,
        &route,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}
