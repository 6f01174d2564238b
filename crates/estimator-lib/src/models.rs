//! Core data models for the resource estimator

use crate::input::{DerivedMetrics, EstimateInput};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A request/limit pair for one resource (CPU cores, memory GB or ephemeral GB)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRange {
    pub request: f64,
    pub limit: f64,
}

impl ResourceRange {
    pub const ZERO: ResourceRange = ResourceRange {
        request: 0.0,
        limit: 0.0,
    };

    pub const fn new(request: f64, limit: f64) -> Self {
        Self { request, limit }
    }

    pub fn add(self, other: ResourceRange) -> Self {
        Self::new(self.request + other.request, self.limit + other.limit)
    }

    pub fn sub(self, other: ResourceRange) -> Self {
        Self::new(self.request - other.request, self.limit - other.limit)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.request * factor, self.limit * factor)
    }

    /// True when neither request nor limit has been set
    pub fn is_zero(&self) -> bool {
        self.request == 0.0 && self.limit == 0.0
    }

    /// Apply `f` to both request and limit
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.request), f(self.limit))
    }
}

/// One hand-authored calibration sample on a curve
///
/// Zero in any field means "not set by this curve". Authored points never
/// carry the contact-support marker; only interpolation results do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    /// Magnitude of the scaling factor at which this sample applies
    pub value: f64,
    pub replicas: u32,
    pub cpu: ResourceRange,
    pub memory: ResourceRange,
    pub ephemeral: ResourceRange,
    /// Persistent storage in GB
    pub storage: f64,
}

impl ReferencePoint {
    pub fn at(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn replicas(mut self, replicas: u32) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn cpu(mut self, request: f64, limit: f64) -> Self {
        self.cpu = ResourceRange::new(request, limit);
        self
    }

    pub fn memory(mut self, request: f64, limit: f64) -> Self {
        self.memory = ResourceRange::new(request, limit);
        self
    }

    pub fn ephemeral(mut self, request: f64, limit: f64) -> Self {
        self.ephemeral = ResourceRange::new(request, limit);
        self
    }

    pub fn storage(mut self, storage: f64) -> Self {
        self.storage = storage;
        self
    }
}

/// Result of evaluating a single curve at one input value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialEnvelope {
    pub replicas: u32,
    pub cpu: ResourceRange,
    pub memory: ResourceRange,
    pub ephemeral: ResourceRange,
    pub storage: f64,
    pub contact_support: bool,
}

impl PartialEnvelope {
    /// Copy a reference point verbatim
    pub fn from_point(point: &ReferencePoint) -> Self {
        Self {
            replicas: point.replicas,
            cpu: point.cpu,
            memory: point.memory,
            ephemeral: point.ephemeral,
            storage: point.storage,
            contact_support: false,
        }
    }
}

/// Merged resource recommendation for one service
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceEnvelope {
    pub replicas: u32,
    pub cpu: ResourceRange,
    pub memory: ResourceRange,
    pub ephemeral: ResourceRange,
    /// Persistent storage in GB
    pub storage: f64,
    /// The requested scale is beyond the calibrated data for this service
    pub contact_support: bool,
}

impl ServiceEnvelope {
    pub fn new(replicas: u32, cpu: ResourceRange, memory: ResourceRange) -> Self {
        Self {
            replicas,
            cpu,
            memory,
            ..Self::default()
        }
    }
}

/// Deployment-wide sums and blended totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub cpu_requests: f64,
    pub cpu_limits: f64,
    pub memory_requests_gb: f64,
    pub memory_limits_gb: f64,
    /// Requests plus half of the gap to limits
    pub total_cpu: f64,
    pub total_memory_gb: f64,
    pub total_storage_gb: f64,
    /// Largest single-service CPU limit, the oversubscribed sizing suggestion
    pub shared_cpu: f64,
    pub shared_memory_gb: f64,
}

/// Full output of one estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub input: EstimateInput,
    pub derived: DerivedMetrics,
    pub services: BTreeMap<String, ServiceEnvelope>,
    pub totals: AggregateTotals,
    /// Any service exceeded its calibrated range
    pub contact_support: bool,
}

impl EstimateResult {
    /// Names of services whose recommendation needs manual sizing
    pub fn contact_support_services(&self) -> Vec<&str> {
        self.services
            .iter()
            .filter(|(_, envelope)| envelope.contact_support)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_range_arithmetic() {
        let a = ResourceRange::new(1.0, 2.0);
        let b = ResourceRange::new(5.0, 10.0);

        assert_eq!(b.sub(a), ResourceRange::new(4.0, 8.0));
        assert_eq!(a.add(b.sub(a).scale(0.5)), ResourceRange::new(3.0, 6.0));
        assert!(ResourceRange::ZERO.is_zero());
        assert!(!ResourceRange::new(0.0, 0.5).is_zero());
    }

    #[test]
    fn test_reference_point_builder() {
        let p = ReferencePoint::at(10.0)
            .replicas(2)
            .cpu(1.0, 2.0)
            .ephemeral(0.0, 6000.0);

        assert_eq!(p.value, 10.0);
        assert_eq!(p.replicas, 2);
        assert_eq!(p.cpu, ResourceRange::new(1.0, 2.0));
        assert!(p.memory.is_zero());
        assert_eq!(p.ephemeral.limit, 6000.0);
        assert_eq!(p.storage, 0.0);
    }

    #[test]
    fn test_partial_from_point_clears_flag() {
        let p = ReferencePoint::at(3.0).replicas(4).storage(12.0);
        let partial = PartialEnvelope::from_point(&p);
        assert_eq!(partial.replicas, 4);
        assert_eq!(partial.storage, 12.0);
        assert!(!partial.contact_support);
    }
}
