//! Observability infrastructure for the resource estimator
//!
//! Provides:
//! - Prometheus metrics (estimate latency, estimate counts, contact-support counts)
//! - Structured JSON logging with tracing

use crate::models::EstimateResult;
use prometheus::{register_histogram, register_int_counter, Histogram, IntCounter};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for estimate latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00001, 0.00005, 0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.05,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<EstimatorMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct EstimatorMetricsInner {
    estimate_latency_seconds: Histogram,
    estimates_total: IntCounter,
    contact_support_total: IntCounter,
    clamped_inputs_total: IntCounter,
}

impl EstimatorMetricsInner {
    fn new() -> Self {
        Self {
            estimate_latency_seconds: register_histogram!(
                "resource_estimator_estimate_latency_seconds",
                "Time spent computing one estimate",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register estimate_latency_seconds"),

            estimates_total: register_int_counter!(
                "resource_estimator_estimates_total",
                "Total number of estimates computed"
            )
            .expect("Failed to register estimates_total"),

            contact_support_total: register_int_counter!(
                "resource_estimator_contact_support_total",
                "Estimates where at least one service exceeded its calibrated range"
            )
            .expect("Failed to register contact_support_total"),

            clamped_inputs_total: register_int_counter!(
                "resource_estimator_clamped_inputs_total",
                "Input fields clamped into their supported range"
            )
            .expect("Failed to register clamped_inputs_total"),
        }
    }
}

/// Estimator metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct EstimatorMetrics {
    _private: (),
}

impl Default for EstimatorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimatorMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(EstimatorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &EstimatorMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record one finished estimate
    pub fn observe_estimate(&self, duration_secs: f64, contact_support: bool) {
        self.inner().estimate_latency_seconds.observe(duration_secs);
        self.inner().estimates_total.inc();
        if contact_support {
            self.inner().contact_support_total.inc();
        }
    }

    /// Count input fields that were clamped
    pub fn inc_clamped_inputs(&self, fields: usize) {
        self.inner().clamped_inputs_total.inc_by(fields as u64);
    }

    pub fn estimates_total(&self) -> u64 {
        self.inner().estimates_total.get()
    }
}

/// Structured logger for estimator events
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    /// Log a computed estimate
    pub fn log_estimate(&self, result: &EstimateResult, duration_secs: f64) {
        if result.contact_support {
            warn!(
                event = "estimate_computed",
                instance = %self.instance,
                deployment = %result.input.deployment,
                services = result.services.len(),
                contact_support_services = ?result.contact_support_services(),
                duration_secs = duration_secs,
                "Estimate exceeds calibrated range for some services"
            );
        } else {
            info!(
                event = "estimate_computed",
                instance = %self.instance,
                deployment = %result.input.deployment,
                services = result.services.len(),
                engaged_users = result.derived.engaged_users,
                average_repositories = result.derived.average_repositories,
                total_cpu = result.totals.total_cpu,
                total_memory_gb = result.totals.total_memory_gb,
                total_storage_gb = result.totals.total_storage_gb,
                duration_secs = duration_secs,
                "Estimate computed"
            );
        }
    }

    /// Log input fields adjusted into range
    pub fn log_clamped_input(&self, fields: &[&str]) {
        if fields.is_empty() {
            return;
        }
        warn!(
            event = "input_clamped",
            instance = %self.instance,
            fields = ?fields,
            "Input fields clamped into supported range"
        );
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str, curves: usize) {
        info!(
            event = "service_started",
            instance = %self.instance,
            version = %version,
            calibration_curves = curves,
            "Resource estimator started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            instance = %self.instance,
            reason = %reason,
            "Resource estimator shutting down"
        );
    }
}
