//! Resource Estimator - sizing service for self-hosted deployments
//!
//! Serves estimates over HTTP from the built-in calibration catalogue,
//! alongside health and Prometheus endpoints.

use anyhow::Result;
use estimator_lib::{
    calibration::CalibrationStore,
    health::{components, HealthRegistry},
    observability::{EstimatorMetrics, StructuredLogger},
};
use resource_estimator::{api, config::ApiConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ESTIMATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting resource-estimator");

    let config = ApiConfig::load()?;
    info!(
        instance = %config.instance,
        api_port = config.api_port,
        clamp_inputs = config.clamp_inputs,
        "Estimator configured"
    );

    let health_registry = HealthRegistry::new();
    health_registry.register(components::API).await;

    // Validate the catalogue before accepting traffic
    api::report_calibration(&health_registry, CalibrationStore::builtin()).await?;
    let store = CalibrationStore::global();

    let metrics = EstimatorMetrics::new();
    let logger = StructuredLogger::new(&config.instance);
    logger.log_startup(ESTIMATOR_VERSION, store.curves().len());

    let app_state = Arc::new(
        api::AppState::new(health_registry.clone(), metrics, logger.clone(), store)
            .with_clamp_inputs(config.clamp_inputs),
    );

    health_registry.set_ready(true);

    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    tokio::select! {
        result = api_handle => {
            result??;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            logger.log_shutdown("SIGINT received");
            info!("Shutting down");
        }
    }

    Ok(())
}
