//! Metrics for vector index operations.

use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Result of an index operation, as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Rejected,
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Rejected => "rejected",
            Outcome::Failed => "failed",
        }
    }
}

/// Vector metrics recorder
pub struct VectorMetrics;

impl VectorMetrics {
    /// Record one gateway operation (`insert`, `query`, `visualize`, ...).
    pub fn record_operation(operation: &'static str, outcome: Outcome, elapsed: Duration) {
        counter!(
            "vector_operations_total",
            "operation" => operation,
            "outcome" => outcome.as_str()
        )
        .increment(1);
        histogram!("vector_operation_duration_seconds", "operation" => operation)
            .record(elapsed.as_secs_f64());

        tracing::debug!(
            operation,
            outcome = outcome.as_str(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Vector operation finished"
        );
    }

    /// Record records handed to the index by insert/update.
    pub fn record_vectors_written(operation: &'static str, count: usize) {
        counter!("vectors_written_total", "operation" => operation).increment(count as u64);
    }

    pub fn set_sample_size(count: usize) {
        gauge!("visualization_sample_size").set(count as f64);
    }
}
