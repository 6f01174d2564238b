//! Error types for the estimator library
//!
//! The estimation engine itself has no failure modes. Errors only arise when
//! building a calibration catalogue or parsing caller-supplied selectors.

use thiserror::Error;

/// Defects detected while validating a calibration catalogue
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    #[error("curve #{index} for service `{service}` has no reference points")]
    EmptyCurve { service: String, index: usize },

    #[error("curve #{index} for service `{service}` has an invalid reference point at value {value}: {reason}")]
    InvalidPoint {
        service: String,
        index: usize,
        value: f64,
        reason: &'static str,
    },

    #[error("pod group `{group}` references unknown service `{service}`")]
    UnknownPodMember { group: String, service: String },

    #[error("pod group `{group}` has no members")]
    EmptyPodGroup { group: String },
}

/// Returned when a deployment topology name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown deployment type `{0}` (expected `kubernetes` or `docker-compose`)")]
pub struct ParseDeploymentError(pub String);
