//! Metrics collection and Prometheus export.
//!
//! Installs the Prometheus recorder backing `/metrics` and counts store calls.

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const STORE_OPERATIONS_TOTAL: &str = "employee_store_operations_total";

/// Initialize the metrics recorder.
///
/// Must run before any metrics are recorded. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!("Prometheus recorder not installed: {}", e);
            return;
        }
    };

    if METRICS_HANDLE.set(handle).is_err() {
        tracing::warn!("Metrics handle already initialized");
        return;
    }

    describe_counter!(
        STORE_OPERATIONS_TOTAL,
        "Employee store calls by operation and outcome"
    );
}

/// Current metrics in Prometheus text format, for the /metrics endpoint.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_store_operation<T, E>(operation: &'static str, result: &Result<T, E>) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    counter!(STORE_OPERATIONS_TOTAL, "operation" => operation, "outcome" => outcome)
        .increment(1);
}
