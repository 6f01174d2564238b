//! Estimate computation
//!
//! Evaluates every applicable curve, folds the partial results per service,
//! equalizes pod replicas and aggregates deployment totals. Each call builds
//! fresh maps and touches no shared mutable state.

use crate::calibration::CalibrationStore;
use crate::input::EstimateInput;
use crate::models::{EstimateResult, ServiceEnvelope};
use crate::scaling::{aggregate, combine, interpolate, synchronize_replicas};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Runs estimates against one calibration store
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    store: &'a CalibrationStore,
}

impl Default for Estimator<'static> {
    fn default() -> Self {
        Self::new(CalibrationStore::global())
    }
}

impl<'a> Estimator<'a> {
    pub fn new(store: &'a CalibrationStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a CalibrationStore {
        self.store
    }

    /// Compute per-service envelopes and totals for `input`
    pub fn estimate(&self, input: &EstimateInput) -> EstimateResult {
        let derived = input.derive();
        let mut services: BTreeMap<String, ServiceEnvelope> = BTreeMap::new();

        for curve in self.store.curves() {
            if let Some(feature) = curve.feature {
                if !input.has_feature(feature) {
                    debug!(service = %curve.service, feature = ?feature, "Skipping curve for disabled feature");
                    continue;
                }
            }

            let value = curve.factor.value_for(input, &derived);
            let mut partial = interpolate(&curve.points, value);
            debug!(
                service = %curve.service,
                factor = %curve.factor,
                value = value,
                replicas = partial.replicas,
                "Evaluated calibration curve"
            );

            if partial.contact_support {
                let (_, max_value) = curve.value_range();
                warn!(
                    service = %curve.service,
                    factor = %curve.factor,
                    value = value,
                    max_calibrated = max_value,
                    "Input exceeds calibrated range, manual sizing required"
                );
            }

            if let Some(rule) = self.store.storage_rule(&curve.service) {
                partial.storage = rule.storage_gb(input);
            }

            let envelope = services.entry(curve.service.clone()).or_default();
            *envelope = combine(*envelope, &partial);
        }

        let services = synchronize_replicas(services, self.store.pod_groups());
        let totals = aggregate(&services, self.store.baseline(input.deployment));
        let contact_support = services.values().any(|s| s.contact_support);

        info!(
            deployment = %input.deployment,
            services = services.len(),
            total_cpu = totals.total_cpu,
            total_memory_gb = totals.total_memory_gb,
            total_storage_gb = totals.total_storage_gb,
            contact_support = contact_support,
            "Estimate computed"
        );

        EstimateResult {
            input: input.clone(),
            derived,
            services,
            totals,
            contact_support,
        }
    }
}

/// Estimate against the built-in calibration catalogue
pub fn estimate(input: &EstimateInput) -> EstimateResult {
    Estimator::default().estimate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::ServiceCurve;
    use crate::input::DeploymentType;
    use crate::models::{ReferencePoint, ResourceRange};
    use crate::scaling::{PodGroup, ScalingFactor};

    fn small_input(deployment: DeploymentType) -> EstimateInput {
        EstimateInput {
            users: 100,
            engagement_rate: 50,
            repositories: 300,
            large_monorepos: 0,
            total_repo_size_gb: 30,
            largest_repo_size_gb: 2,
            largest_index_size_gb: 1,
            code_insight: true,
            code_intel: true,
            deployment,
        }
    }

    #[test]
    fn test_builtin_estimate_covers_all_services() {
        let result = estimate(&small_input(DeploymentType::Kubernetes));
        for service in CalibrationStore::global().services() {
            assert!(result.services.contains_key(service), "missing {service}");
        }
        assert!(!result.contact_support);
    }

    #[test]
    fn test_small_deployment_frontend() {
        let result = estimate(&small_input(DeploymentType::Kubernetes));
        // 50 engaged users + 1000 for code insight lies between 325 and 1750 users
        let frontend = &result.services["frontend"];
        assert_eq!(frontend.replicas, 3);
        assert_eq!(frontend.cpu, ResourceRange::new(2.0, 2.0));
        assert_eq!(frontend.memory, ResourceRange::new(2.0, 4.0));
    }

    #[test]
    fn test_multi_curve_service_merges_groups() {
        let result = estimate(&small_input(DeploymentType::Kubernetes));
        let searcher = &result.services["searcher"];

        // replicas from the repository curve: 300 repos sits between 5 and 1500
        assert_eq!(searcher.replicas, 1);
        // resources from the monorepo curve at zero monorepos
        assert_eq!(searcher.cpu, ResourceRange::new(0.5, 2.0));
        assert_eq!(searcher.memory, ResourceRange::new(0.5, 2.0));
        // archive cache from the largest-repository curve at 2GB
        assert_eq!(searcher.ephemeral, ResourceRange::new(6.0, 12.0));
    }

    #[test]
    fn test_storage_rules_applied() {
        let k8s = estimate(&small_input(DeploymentType::Kubernetes));
        assert_eq!(k8s.services["gitserver"].storage, 36.0);
        assert_eq!(k8s.services["zoekt-webserver"].storage, 18.0);
        assert_eq!(k8s.services["zoekt-indexserver"].storage, 0.0);
        assert_eq!(k8s.services["minio"].storage, 1.0);
        assert_eq!(k8s.services["frontend"].storage, 0.0);

        let compose = estimate(&small_input(DeploymentType::DockerCompose));
        assert_eq!(compose.services["zoekt-webserver"].storage, 9.0);
        assert_eq!(compose.services["zoekt-indexserver"].storage, 9.0);
    }

    #[test]
    fn test_code_intel_gate() {
        let input = EstimateInput {
            code_intel: false,
            ..small_input(DeploymentType::Kubernetes)
        };
        let result = estimate(&input);
        assert!(!result.services.contains_key("minio"));
        assert!(!result.services.contains_key("precise-code-intel-worker"));
        assert!(result.services.contains_key("frontend"));
    }

    #[test]
    fn test_indexed_search_pod_replicas_match() {
        let input = EstimateInput {
            repositories: 20_000,
            ..small_input(DeploymentType::Kubernetes)
        };
        let result = estimate(&input);
        assert_eq!(
            result.services["zoekt-webserver"].replicas,
            result.services["zoekt-indexserver"].replicas
        );
    }

    #[test]
    fn test_contact_support_when_users_exceed_calibration() {
        let input = EstimateInput {
            users: 25_000,
            engagement_rate: 100,
            code_insight: true,
            ..small_input(DeploymentType::Kubernetes)
        };
        let result = estimate(&input);

        assert!(result.contact_support);
        let frontend = &result.services["frontend"];
        assert!(frontend.contact_support);
        assert_eq!(frontend.replicas, 9);
        assert!(result.contact_support_services().contains(&"frontend"));
        assert!(!result.services["gitserver"].contact_support);
    }

    #[test]
    fn test_baseline_services_in_totals_only() {
        let result = estimate(&small_input(DeploymentType::Kubernetes));
        assert!(!result.services.contains_key("redis-cache"));

        let computed_cpu: f64 = result.services.values().map(|s| s.cpu.request).sum();
        assert!(result.totals.cpu_requests > computed_cpu);
    }

    #[test]
    fn test_custom_store_merge_order() {
        let curves = vec![
            ServiceCurve::new(
                "svc",
                ScalingFactor::AverageRepositories,
                vec![
                    ReferencePoint::at(0.0).replicas(1),
                    ReferencePoint::at(1000.0).replicas(3),
                ],
            ),
            ServiceCurve::new(
                "svc",
                ScalingFactor::LargestRepoSize,
                vec![ReferencePoint::at(10.0).replicas(7).ephemeral(0.0, 6000.0)],
            ),
            ServiceCurve::new(
                "peer",
                ScalingFactor::AverageRepositories,
                vec![ReferencePoint::at(0.0).replicas(5)],
            ),
        ];
        let store = CalibrationStore::new(
            curves,
            BTreeMap::new(),
            vec![PodGroup::new("pod", &["svc", "peer"])],
            BTreeMap::new(),
        )
        .unwrap();

        let input = EstimateInput {
            repositories: 500,
            large_monorepos: 0,
            largest_repo_size_gb: 10,
            ..EstimateInput::default()
        };
        let result = Estimator::new(&store).estimate(&input);
        let svc = &result.services["svc"];

        // replicas from the first curve, raised to the pod maximum
        assert_eq!(svc.replicas, 5);
        assert_eq!(svc.ephemeral, ResourceRange::new(0.0, 6000.0));
        assert!(result.services["peer"].contact_support);
    }
}
