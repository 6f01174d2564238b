//! Persistent-storage sizing rules
//!
//! Storage does not come from curve interpolation. Services that own a
//! volume size it from the repository and index inputs directly.

use crate::input::{DeploymentType, EstimateInput};
use serde::{Deserialize, Serialize};

/// Headroom applied on top of the raw repository size, in percent
const REPO_HEADROOM_PERCENT: u64 = 120;

/// How a service's persistent volume is derived from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageRule {
    /// Full copy of every repository plus headroom
    RepositoryClones,
    /// Large enough for the biggest code-intel upload
    LargestIndex,
    /// Search index, about half the cloned size; split across two volumes on compose
    SearchIndex,
    /// Indexer scratch volume; shares the index volume on kubernetes
    SearchIndexer,
}

impl StorageRule {
    /// Storage in whole GB for the given input
    pub fn storage_gb(&self, input: &EstimateInput) -> f64 {
        let (docker_factor, k8s_factor) = match input.deployment {
            DeploymentType::DockerCompose => (2, 1),
            DeploymentType::Kubernetes => (1, 0),
        };
        let clones = input.total_repo_size_gb as u64 * REPO_HEADROOM_PERCENT / 100;

        let gb = match self {
            StorageRule::RepositoryClones => clones,
            StorageRule::LargestIndex => input.largest_index_size_gb as u64,
            StorageRule::SearchIndex => clones / 2 / docker_factor,
            StorageRule::SearchIndexer => clones / 2 / docker_factor * k8s_factor,
        };
        gb as f64
    }
}
