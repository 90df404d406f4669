//! Observability utilities for the vector gateway.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Vector operation metrics
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, VectorMetrics};
//!
//! init_metrics()?;
//! VectorMetrics::record_vectors_written("insert", 2);
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod vector;

pub use middleware::metrics_middleware;
pub use vector::{Outcome, VectorMetrics};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder.
///
/// Call once at startup; later calls return the existing handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_gauge, describe_histogram};

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Vector metrics
    describe_counter!(
        "vector_operations_total",
        "Vector index operations by operation and outcome"
    );
    describe_histogram!(
        "vector_operation_duration_seconds",
        "Vector index operation duration in seconds"
    );
    describe_counter!(
        "vectors_written_total",
        "Vector records written to the index by operation"
    );
    describe_gauge!(
        "visualization_sample_size",
        "Number of records in the last visualization sample"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_handler_before_init() {
        if get_metrics_handle().is_none() {
            assert_eq!(metrics_handler().await, "# Metrics not initialized\n");
        }
    }
}
