//! Calibration store
//!
//! Holds every service curve, the per-topology baseline envelopes, the pod
//! groups and the storage rules. A store is validated and sorted once on
//! construction and is read-only afterwards. The built-in catalogue lives in
//! a process-wide [`OnceLock`] so it is initialized exactly once.

mod defaults;
mod references;

pub use defaults::{baseline_defaults, pod_groups, storage_rules};
pub use references::reference_curves;

use crate::error::CalibrationError;
use crate::input::{DeploymentType, Feature};
use crate::models::{ReferencePoint, ServiceEnvelope};
use crate::scaling::{PodGroup, ScalingFactor, StorageRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

static BUILTIN_STORE: OnceLock<CalibrationStore> = OnceLock::new();

/// One calibration curve: how part of a service's envelope scales with one factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCurve {
    pub service: String,
    pub factor: ScalingFactor,
    /// Curve only applies when this feature is enabled
    pub feature: Option<Feature>,
    pub points: Vec<ReferencePoint>,
}

impl ServiceCurve {
    pub fn new(service: impl Into<String>, factor: ScalingFactor, points: Vec<ReferencePoint>) -> Self {
        Self {
            service: service.into(),
            factor,
            feature: None,
            points,
        }
    }

    pub fn requires(mut self, feature: Feature) -> Self {
        self.feature = Some(feature);
        self
    }

    /// Smallest and largest calibrated values
    pub fn value_range(&self) -> (f64, f64) {
        let min = self.points.first().map(|p| p.value).unwrap_or(0.0);
        let max = self.points.last().map(|p| p.value).unwrap_or(0.0);
        (min, max)
    }
}

/// Read-only summary of one curve for listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSummary {
    pub service: String,
    pub factor: ScalingFactor,
    pub feature: Option<Feature>,
    pub points: usize,
    pub min_value: f64,
    pub max_value: f64,
}

/// Validated, sorted calibration catalogue
#[derive(Debug, Clone)]
pub struct CalibrationStore {
    curves: Vec<ServiceCurve>,
    baseline: BTreeMap<DeploymentType, BTreeMap<String, ServiceEnvelope>>,
    pod_groups: Vec<PodGroup>,
    storage_rules: BTreeMap<String, StorageRule>,
}

impl CalibrationStore {
    /// Validate a catalogue and sort each curve ascending by value
    ///
    /// Curve order is kept as given; it is the merge order for services
    /// with several curves. The per-curve sort is stable, so points sharing
    /// a value keep their authored order.
    pub fn new(
        mut curves: Vec<ServiceCurve>,
        mut baseline: BTreeMap<DeploymentType, BTreeMap<String, ServiceEnvelope>>,
        pod_groups: Vec<PodGroup>,
        storage_rules: BTreeMap<String, StorageRule>,
    ) -> Result<Self, CalibrationError> {
        for (index, curve) in curves.iter_mut().enumerate() {
            validate_curve(index, curve)?;
            curve.points.sort_by(|a, b| a.value.total_cmp(&b.value));
        }

        for group in &pod_groups {
            if group.services.is_empty() {
                return Err(CalibrationError::EmptyPodGroup {
                    group: group.name.clone(),
                });
            }
            for member in &group.services {
                if !curves.iter().any(|c| &c.service == member) {
                    return Err(CalibrationError::UnknownPodMember {
                        group: group.name.clone(),
                        service: member.clone(),
                    });
                }
            }
        }

        for deployment in DeploymentType::ALL {
            baseline.entry(deployment).or_default();
        }

        debug!(
            curves = curves.len(),
            pod_groups = pod_groups.len(),
            "Calibration store initialized"
        );

        Ok(Self {
            curves,
            baseline,
            pod_groups,
            storage_rules,
        })
    }

    /// Build the compiled-in catalogue
    pub fn builtin() -> Result<Self, CalibrationError> {
        Self::new(reference_curves(), baseline_defaults(), pod_groups(), storage_rules())
    }

    /// The process-wide built-in store, initialized on first use
    ///
    /// # Panics
    /// If the compiled-in catalogue fails validation. That is a defect in
    /// the catalogue, not a runtime condition.
    pub fn global() -> &'static CalibrationStore {
        BUILTIN_STORE.get_or_init(|| {
            Self::builtin()
                .unwrap_or_else(|e| panic!("built-in calibration catalogue is invalid: {e}"))
        })
    }

    /// All curves in declaration order
    pub fn curves(&self) -> &[ServiceCurve] {
        &self.curves
    }

    /// Curves for one service in declaration order
    pub fn curves_for<'a>(&'a self, service: &'a str) -> impl Iterator<Item = &'a ServiceCurve> {
        self.curves.iter().filter(move |c| c.service == service)
    }

    /// Distinct service names in order of first appearance
    pub fn services(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for curve in &self.curves {
            if !names.contains(&curve.service.as_str()) {
                names.push(&curve.service);
            }
        }
        names
    }

    /// Baseline envelopes for services with fixed cost on this topology
    pub fn baseline(&self, deployment: DeploymentType) -> &BTreeMap<String, ServiceEnvelope> {
        &self.baseline[&deployment]
    }

    pub fn pod_groups(&self) -> &[PodGroup] {
        &self.pod_groups
    }

    pub fn storage_rule(&self, service: &str) -> Option<StorageRule> {
        self.storage_rules.get(service).copied()
    }

    pub fn summaries(&self) -> Vec<CurveSummary> {
        self.curves
            .iter()
            .map(|curve| {
                let (min_value, max_value) = curve.value_range();
                CurveSummary {
                    service: curve.service.clone(),
                    factor: curve.factor,
                    feature: curve.feature,
                    points: curve.points.len(),
                    min_value,
                    max_value,
                }
            })
            .collect()
    }
}

fn validate_curve(index: usize, curve: &ServiceCurve) -> Result<(), CalibrationError> {
    if curve.points.is_empty() {
        return Err(CalibrationError::EmptyCurve {
            service: curve.service.clone(),
            index,
        });
    }

    for point in &curve.points {
        let invalid = |reason| CalibrationError::InvalidPoint {
            service: curve.service.clone(),
            index,
            value: point.value,
            reason,
        };

        if !point.value.is_finite() || point.value < 0.0 {
            return Err(invalid("value must be finite and non-negative"));
        }
        let fields = [
            point.cpu.request,
            point.cpu.limit,
            point.memory.request,
            point.memory.limit,
            point.ephemeral.request,
            point.ephemeral.limit,
            point.storage,
        ];
        if fields.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(invalid("resources must be finite and non-negative"));
        }
    }
    Ok(())
}
