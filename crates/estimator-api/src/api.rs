//! HTTP API for estimates, the calibration catalogue, health checks and
//! Prometheus metrics

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use estimator_lib::{
    calibration::{CalibrationStore, CurveSummary},
    health::{components, ComponentStatus, HealthRegistry},
    observability::{EstimatorMetrics, StructuredLogger},
    CalibrationError, DeploymentType, EstimateInput, EstimateResult, Estimator, ServiceEnvelope,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub health_registry: HealthRegistry,
    pub metrics: EstimatorMetrics,
    pub logger: StructuredLogger,
    pub store: &'static CalibrationStore,
    pub clamp_inputs: bool,
}

impl AppState {
    pub fn new(
        health_registry: HealthRegistry,
        metrics: EstimatorMetrics,
        logger: StructuredLogger,
        store: &'static CalibrationStore,
    ) -> Self {
        Self {
            health_registry,
            metrics,
            logger,
            store,
            clamp_inputs: true,
        }
    }

    pub fn with_clamp_inputs(mut self, clamp_inputs: bool) -> Self {
        self.clamp_inputs = clamp_inputs;
        self
    }
}

/// Record the outcome of loading the calibration catalogue
///
/// A failed load marks the calibration store unhealthy and is passed back
/// to the caller.
pub async fn report_calibration<T>(
    registry: &HealthRegistry,
    loaded: Result<T, CalibrationError>,
) -> Result<T, CalibrationError> {
    match &loaded {
        Ok(_) => registry.register(components::CALIBRATION_STORE).await,
        Err(e) => {
            error!(error = %e, "Calibration catalogue failed validation");
            registry
                .set_unhealthy(components::CALIBRATION_STORE, e.to_string())
                .await;
        }
    }
    loaded
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub result: EstimateResult,
    /// Input fields adjusted into their supported range
    pub clamped_fields: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurvesResponse {
    pub curves: Vec<CurveSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultsResponse {
    pub deployment: DeploymentType,
    pub services: BTreeMap<String, ServiceEnvelope>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Compute an estimate; missing input fields take their defaults
async fn post_estimate(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EstimateInput>,
) -> impl IntoResponse {
    let started = Instant::now();

    let (input, clamped_fields) = if state.clamp_inputs {
        input.clamped()
    } else {
        (input, Vec::new())
    };
    if !clamped_fields.is_empty() {
        state.metrics.inc_clamped_inputs(clamped_fields.len());
        state.logger.log_clamped_input(&clamped_fields);
    }

    let result = Estimator::new(state.store).estimate(&input);

    let elapsed = started.elapsed().as_secs_f64();
    state.metrics.observe_estimate(elapsed, result.contact_support);
    state.logger.log_estimate(&result, elapsed);

    Json(EstimateResponse {
        result,
        clamped_fields: clamped_fields.into_iter().map(String::from).collect(),
        generated_at: Utc::now(),
    })
}

async fn get_curves(State(state): State<Arc<AppState>>) -> Json<CurvesResponse> {
    Json(CurvesResponse {
        curves: state.store.summaries(),
    })
}

/// Baseline envelopes for one deployment topology
async fn get_defaults(
    State(state): State<Arc<AppState>>,
    Path(deployment): Path<String>,
) -> Response {
    match deployment.parse::<DeploymentType>() {
        Ok(deployment) => Json(DefaultsResponse {
            deployment,
            services: state.store.baseline(deployment).clone(),
        })
        .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        error!(error = %e, "Failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/estimate", post(post_estimate))
        .route("/api/v1/curves", get(get_curves))
        .route("/api/v1/defaults/:deployment", get(get_defaults))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
