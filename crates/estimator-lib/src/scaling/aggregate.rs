//! Deployment-wide totals
//!
//! Blended totals are requests plus half of the gap to limits.

use crate::models::{AggregateTotals, ServiceEnvelope};
use std::collections::{BTreeMap, HashSet};

/// Share of the request-to-limit gap counted towards totals
pub const LIMIT_GAP_SHARE: f64 = 0.5;

/// Sum computed envelopes and baseline defaults into totals
///
/// A service present in `computed` is counted once from its computed
/// envelope; its baseline default is ignored.
pub fn aggregate(
    computed: &BTreeMap<String, ServiceEnvelope>,
    baseline: &BTreeMap<String, ServiceEnvelope>,
) -> AggregateTotals {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut totals = AggregateTotals::default();

    let all = computed.iter().chain(baseline.iter());
    for (name, envelope) in all {
        if !visited.insert(name.as_str()) {
            continue;
        }
        totals.cpu_requests += envelope.cpu.request;
        totals.cpu_limits += envelope.cpu.limit;
        totals.memory_requests_gb += envelope.memory.request;
        totals.memory_limits_gb += envelope.memory.limit;
        totals.total_storage_gb += envelope.storage;
        totals.shared_cpu = totals.shared_cpu.max(envelope.cpu.limit);
        totals.shared_memory_gb = totals.shared_memory_gb.max(envelope.memory.limit);
    }

    totals.total_cpu = blend(totals.cpu_requests, totals.cpu_limits);
    totals.total_memory_gb = blend(totals.memory_requests_gb, totals.memory_limits_gb);
    totals
}

fn blend(requests: f64, limits: f64) -> f64 {
    requests + (limits - requests) * LIMIT_GAP_SHARE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceRange;

    fn envelope(cpu: (f64, f64), memory: (f64, f64), storage: f64) -> ServiceEnvelope {
        ServiceEnvelope {
            replicas: 1,
            cpu: ResourceRange::new(cpu.0, cpu.1),
            memory: ResourceRange::new(memory.0, memory.1),
            storage,
            ..ServiceEnvelope::default()
        }
    }

    #[test]
    fn test_blended_totals() {
        let mut computed = BTreeMap::new();
        computed.insert("a".to_string(), envelope((2.0, 4.0), (4.0, 8.0), 10.0));
        computed.insert("b".to_string(), envelope((1.0, 2.0), (1.0, 1.0), 5.0));

        let totals = aggregate(&computed, &BTreeMap::new());

        assert_eq!(totals.cpu_requests, 3.0);
        assert_eq!(totals.cpu_limits, 6.0);
        assert_eq!(totals.total_cpu, 4.5);
        assert_eq!(totals.total_memory_gb, 7.0);
        assert_eq!(totals.total_storage_gb, 15.0);
        assert_eq!(totals.shared_cpu, 4.0);
        assert_eq!(totals.shared_memory_gb, 8.0);
    }

    #[test]
    fn test_baseline_not_double_counted() {
        let mut computed = BTreeMap::new();
        computed.insert("searcher".to_string(), envelope((1.0, 4.0), (1.0, 4.0), 0.0));

        let mut baseline = BTreeMap::new();
        baseline.insert("searcher".to_string(), envelope((0.5, 2.0), (0.5, 2.0), 0.0));
        baseline.insert("redis-cache".to_string(), envelope((1.0, 1.0), (6.0, 6.0), 0.0));

        let totals = aggregate(&computed, &baseline);

        assert_eq!(totals.cpu_requests, 2.0);
        assert_eq!(totals.cpu_limits, 5.0);
        assert_eq!(totals.memory_requests_gb, 7.0);
        assert_eq!(totals.memory_limits_gb, 10.0);
        assert_eq!(totals.shared_memory_gb, 6.0);
    }

    #[test]
    fn test_flagged_services_still_counted() {
        let mut computed = BTreeMap::new();
        let mut flagged = envelope((12.0, 64.0), (6.0, 10.0), 0.0);
        flagged.contact_support = true;
        computed.insert("syntect-server".to_string(), flagged);

        let totals = aggregate(&computed, &BTreeMap::new());
        assert_eq!(totals.total_cpu, 38.0);
        assert_eq!(totals.shared_cpu, 64.0);
    }

    #[test]
    fn test_totals_between_requests_and_limits() {
        let mut computed = BTreeMap::new();
        computed.insert("x".to_string(), envelope((0.25, 8.0), (0.5, 16.0), 0.0));
        let totals = aggregate(&computed, &BTreeMap::new());

        assert!(totals.cpu_requests <= totals.total_cpu && totals.total_cpu <= totals.cpu_limits);
        assert!(
            totals.memory_requests_gb <= totals.total_memory_gb
                && totals.total_memory_gb <= totals.memory_limits_gb
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(
            aggregate(&BTreeMap::new(), &BTreeMap::new()),
            AggregateTotals::default()
        );
    }
}
