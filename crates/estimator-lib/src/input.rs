//! Caller-supplied business metrics and the values derived from them
//!
//! The engine accepts any input. Range clamping is an upstream step offered
//! here as [`EstimateInput::clamped`] for the service and CLI to apply.

use crate::error::ParseDeploymentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One large monorepo is sized like this many average repositories
pub const MONOREPO_FACTOR: u64 = 50;

/// Extra engaged users assumed when code insight background jobs are enabled
pub const CODE_INSIGHT_USERS: u64 = 1000;

/// Inclusive bounds for one input field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn clamp_u32(&self, value: u32) -> u32 {
        (value as f64).clamp(self.min, self.max) as u32
    }
}

pub const USERS_RANGE: InputRange = InputRange::new(5.0, 25_000.0);
pub const REPOSITORIES_RANGE: InputRange = InputRange::new(5.0, 5_000_000.0);
pub const TOTAL_REPO_SIZE_RANGE: InputRange = InputRange::new(1.0, 5_000.0);
pub const LARGE_MONOREPOS_RANGE: InputRange = InputRange::new(0.0, 10.0);
pub const LARGEST_REPO_SIZE_RANGE: InputRange = InputRange::new(0.0, 5_000.0);
pub const LARGEST_INDEX_SIZE_RANGE: InputRange = InputRange::new(0.0, 100.0);
pub const ENGAGEMENT_RATE_RANGE: InputRange = InputRange::new(5.0, 100.0);
pub const USER_REPO_SUM_RATIO_RANGE: InputRange = InputRange::new(1.0, 200.0);
pub const AVERAGE_REPOSITORIES_RANGE: InputRange = InputRange::new(
    REPOSITORIES_RANGE.min + LARGE_MONOREPOS_RANGE.min * MONOREPO_FACTOR as f64,
    REPOSITORIES_RANGE.max + LARGE_MONOREPOS_RANGE.max * MONOREPO_FACTOR as f64,
);

/// Deployment topology
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentType {
    #[default]
    Kubernetes,
    DockerCompose,
}

impl DeploymentType {
    pub const ALL: [DeploymentType; 2] = [DeploymentType::Kubernetes, DeploymentType::DockerCompose];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentType::Kubernetes => "kubernetes",
            DeploymentType::DockerCompose => "docker-compose",
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentType {
    type Err = ParseDeploymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kubernetes" | "k8s" => Ok(DeploymentType::Kubernetes),
            "docker-compose" | "compose" => Ok(DeploymentType::DockerCompose),
            other => Err(ParseDeploymentError(other.to_string())),
        }
    }
}

/// Optional product features that change which services are deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    CodeIntel,
}

/// Business metrics describing the deployment to size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateInput {
    pub users: u32,
    /// Percentage of users active on a regular basis
    pub engagement_rate: u32,
    pub repositories: u32,
    /// Repositories larger than ~2GB
    pub large_monorepos: u32,
    pub total_repo_size_gb: u32,
    pub largest_repo_size_gb: u32,
    pub largest_index_size_gb: u32,
    pub code_insight: bool,
    pub code_intel: bool,
    pub deployment: DeploymentType,
}

impl Default for EstimateInput {
    fn default() -> Self {
        Self {
            users: 300,
            engagement_rate: 100,
            repositories: 5000,
            large_monorepos: 5,
            total_repo_size_gb: 500,
            largest_repo_size_gb: 5,
            largest_index_size_gb: 3,
            code_insight: true,
            code_intel: true,
            deployment: DeploymentType::Kubernetes,
        }
    }
}

impl EstimateInput {
    /// Whether a feature-gated curve applies to this input
    pub fn has_feature(&self, feature: Feature) -> bool {
        match feature {
            Feature::CodeIntel => self.code_intel,
        }
    }

    /// Clamp every numeric field into its supported range
    ///
    /// Returns the clamped input and the names of fields that changed.
    pub fn clamped(&self) -> (EstimateInput, Vec<&'static str>) {
        let mut out = self.clone();
        let mut changed = Vec::new();

        let fields: [(&'static str, &mut u32, InputRange); 7] = [
            ("users", &mut out.users, USERS_RANGE),
            ("engagement_rate", &mut out.engagement_rate, ENGAGEMENT_RATE_RANGE),
            ("repositories", &mut out.repositories, REPOSITORIES_RANGE),
            ("large_monorepos", &mut out.large_monorepos, LARGE_MONOREPOS_RANGE),
            ("total_repo_size_gb", &mut out.total_repo_size_gb, TOTAL_REPO_SIZE_RANGE),
            ("largest_repo_size_gb", &mut out.largest_repo_size_gb, LARGEST_REPO_SIZE_RANGE),
            ("largest_index_size_gb", &mut out.largest_index_size_gb, LARGEST_INDEX_SIZE_RANGE),
        ];
        for (name, value, range) in fields {
            let clamped = range.clamp_u32(*value);
            if clamped != *value {
                *value = clamped;
                changed.push(name);
            }
        }

        (out, changed)
    }

    /// Compute the scalar metrics the scaling factors are keyed on
    pub fn derive(&self) -> DerivedMetrics {
        let monorepo_repos = self.large_monorepos as u64 * MONOREPO_FACTOR;
        DerivedMetrics {
            engaged_users: self.users as u64 * self.engagement_rate as u64 / 100,
            average_repositories: self.repositories as u64 + monorepo_repos,
            user_repo_sum_ratio: (self.users as u64 + self.repositories as u64 + monorepo_repos)
                / 1000,
        }
    }
}

/// Metrics computed from an [`EstimateInput`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub engaged_users: u64,
    /// Repositories plus large monorepos weighted by [`MONOREPO_FACTOR`]
    pub average_repositories: u64,
    /// (users + average repositories) / 1000
    pub user_repo_sum_ratio: u64,
}
