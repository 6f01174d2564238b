//! Fixed-cost services, pod groups and storage ownership

use crate::input::DeploymentType;
use crate::models::{ResourceRange, ServiceEnvelope};
use crate::scaling::{PodGroup, StorageRule};
use std::collections::BTreeMap;

fn baseline(cpu: (f64, f64), memory: (f64, f64)) -> ServiceEnvelope {
    ServiceEnvelope::new(
        1,
        ResourceRange::new(cpu.0, cpu.1),
        ResourceRange::new(memory.0, memory.1),
    )
}

/// Baseline envelope per service for each topology
///
/// Services without any curve contribute these fixed costs to totals.
/// Services that also have curves are only counted from their curves.
pub fn baseline_defaults() -> BTreeMap<DeploymentType, BTreeMap<String, ServiceEnvelope>> {
    let kubernetes = [
        ("prometheus", baseline((0.5, 0.5), (2.0, 2.0))),
        ("query-runner", baseline((0.5, 1.0), (1.0, 1.0))),
        ("redis-store", baseline((1.0, 1.0), (6.0, 6.0))),
        ("redis-cache", baseline((1.0, 1.0), (6.0, 6.0))),
        ("replacer", baseline((0.5, 4.0), (0.5, 0.5))),
        ("repo-updater", baseline((0.1, 0.1), (0.5, 0.5))),
        ("searcher", baseline((0.5, 2.0), (0.5, 2.0))),
        ("symbols", baseline((0.5, 2.0), (0.5, 2.0))),
        ("syntect-server", baseline((0.25, 4.0), (2.0, 6.0))),
    ];
    let docker_compose = [
        ("prometheus", baseline((0.5, 4.0), (2.0, 8.0))),
        ("query-runner", baseline((0.5, 1.0), (1.0, 1.0))),
        ("redis-store", baseline((1.0, 1.0), (6.0, 6.0))),
        ("redis-cache", baseline((1.0, 1.0), (6.0, 6.0))),
        ("replacer", baseline((0.5, 1.0), (0.5, 0.5))),
        ("repo-updater", baseline((0.1, 4.0), (0.5, 4.0))),
        ("searcher", baseline((0.5, 2.0), (0.5, 2.0))),
        ("symbols", baseline((0.5, 2.0), (0.5, 4.0))),
        ("syntect-server", baseline((0.25, 4.0), (2.0, 6.0))),
    ];

    let to_map = |entries: [(&str, ServiceEnvelope); 9]| {
        entries
            .into_iter()
            .map(|(name, envelope)| (name.to_string(), envelope))
            .collect::<BTreeMap<_, _>>()
    };

    BTreeMap::from([
        (DeploymentType::Kubernetes, to_map(kubernetes)),
        (DeploymentType::DockerCompose, to_map(docker_compose)),
    ])
}

/// Services scheduled into the same pod
pub fn pod_groups() -> Vec<PodGroup> {
    vec![PodGroup::new(
        "indexed-search",
        &["zoekt-webserver", "zoekt-indexserver"],
    )]
}

/// Services that own a persistent volume
pub fn storage_rules() -> BTreeMap<String, StorageRule> {
    [
        ("gitserver", StorageRule::RepositoryClones),
        ("minio", StorageRule::LargestIndex),
        ("zoekt-webserver", StorageRule::SearchIndex),
        ("zoekt-indexserver", StorageRule::SearchIndexer),
    ]
    .into_iter()
    .map(|(name, rule)| (name.to_string(), rule))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baselines_cover_both_topologies() {
        let defaults = baseline_defaults();
        for deployment in DeploymentType::ALL {
            let services = &defaults[&deployment];
            assert_eq!(services.len(), 9);
            assert!(services.contains_key("redis-cache"));
            assert!(services
                .values()
                .all(|s| s.cpu.request <= s.cpu.limit && s.memory.request <= s.memory.limit));
        }
    }

    #[test]
    fn test_topology_specific_values() {
        let defaults = baseline_defaults();
        let k8s = &defaults[&DeploymentType::Kubernetes]["prometheus"];
        let compose = &defaults[&DeploymentType::DockerCompose]["prometheus"];
        assert_eq!(k8s.cpu.limit, 0.5);
        assert_eq!(compose.cpu.limit, 4.0);
    }

    #[test]
    fn test_storage_rules() {
        let rules = storage_rules();
        assert_eq!(rules["gitserver"], StorageRule::RepositoryClones);
        assert!(!rules.contains_key("frontend"));
    }
}
