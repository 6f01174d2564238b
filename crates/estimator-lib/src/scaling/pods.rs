//! Replica synchronization for co-scheduled services

use crate::models::ServiceEnvelope;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Services that share a pod and must report the same replica count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodGroup {
    pub name: String,
    pub services: Vec<String>,
}

impl PodGroup {
    pub fn new(name: impl Into<String>, services: &[&str]) -> Self {
        Self {
            name: name.into(),
            services: services.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Raise every member of each group to the group's largest replica count
///
/// Members missing from `services` (for example a feature-gated service) are
/// skipped and not inserted.
pub fn synchronize_replicas(
    mut services: BTreeMap<String, ServiceEnvelope>,
    groups: &[PodGroup],
) -> BTreeMap<String, ServiceEnvelope> {
    for group in groups {
        let max_replicas = group
            .services
            .iter()
            .filter_map(|name| services.get(name))
            .map(|envelope| envelope.replicas)
            .max();

        let Some(max_replicas) = max_replicas else {
            continue;
        };

        for name in &group.services {
            if let Some(envelope) = services.get_mut(name) {
                envelope.replicas = max_replicas;
            }
        }
    }
    services
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(replicas: u32) -> ServiceEnvelope {
        ServiceEnvelope {
            replicas,
            ..ServiceEnvelope::default()
        }
    }

    #[test]
    fn test_members_raised_to_max() {
        let mut services = BTreeMap::new();
        services.insert("zoekt-webserver".to_string(), envelope(1));
        services.insert("zoekt-indexserver".to_string(), envelope(2));
        services.insert("frontend".to_string(), envelope(5));

        let groups = [PodGroup::new("indexed-search", &["zoekt-webserver", "zoekt-indexserver"])];
        let services = synchronize_replicas(services, &groups);

        assert_eq!(services["zoekt-webserver"].replicas, 2);
        assert_eq!(services["zoekt-indexserver"].replicas, 2);
        assert_eq!(services["frontend"].replicas, 5);
    }

    #[test]
    fn test_missing_members_not_inserted() {
        let mut services = BTreeMap::new();
        services.insert("a".to_string(), envelope(3));

        let groups = [PodGroup::new("pair", &["a", "b"])];
        let services = synchronize_replicas(services, &groups);

        assert_eq!(services.len(), 1);
        assert_eq!(services["a"].replicas, 3);
    }

    #[test]
    fn test_group_with_no_present_members_is_skipped() {
        let services = synchronize_replicas(BTreeMap::new(), &[PodGroup::new("pair", &["a", "b"])]);
        assert!(services.is_empty());
    }
}
