//! Resource estimation library for self-hosted deployments
//!
//! This crate provides the core functionality for:
//! - Calibration curves and fixed baselines per deployment topology
//! - Piecewise-linear scaling of per-service resource envelopes
//! - Deployment-wide aggregation of requests, limits and storage
//! - Health checks and observability

pub mod calibration;
pub mod error;
pub mod estimator;
pub mod health;
pub mod input;
pub mod models;
pub mod observability;
pub mod scaling;

pub use calibration::{CalibrationStore, CurveSummary, ServiceCurve};
pub use error::{CalibrationError, ParseDeploymentError};
pub use estimator::{estimate, Estimator};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use input::{DeploymentType, DerivedMetrics, EstimateInput, Feature};
pub use models::*;
pub use observability::{EstimatorMetrics, StructuredLogger};
