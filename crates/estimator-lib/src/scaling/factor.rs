//! Scaling factors a calibration curve can be keyed on

use crate::input::{DerivedMetrics, EstimateInput, CODE_INSIGHT_USERS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Independent business metric driving one curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingFactor {
    EngagedUsers,
    AverageRepositories,
    TotalRepoSize,
    LargeMonorepos,
    LargestRepoSize,
    LargestIndexSize,
    UserRepoSumRatio,
}

impl ScalingFactor {
    /// The query value for this factor given the caller's input
    pub fn value_for(&self, input: &EstimateInput, derived: &DerivedMetrics) -> f64 {
        match self {
            ScalingFactor::EngagedUsers => {
                let mut users = derived.engaged_users;
                if input.code_insight {
                    users += CODE_INSIGHT_USERS;
                }
                users as f64
            }
            ScalingFactor::AverageRepositories => derived.average_repositories as f64,
            ScalingFactor::TotalRepoSize => input.total_repo_size_gb as f64,
            ScalingFactor::LargeMonorepos => input.large_monorepos as f64,
            ScalingFactor::LargestRepoSize => input.largest_repo_size_gb as f64,
            ScalingFactor::LargestIndexSize => input.largest_index_size_gb as f64,
            ScalingFactor::UserRepoSumRatio => derived.user_repo_sum_ratio as f64,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalingFactor::EngagedUsers => "engaged_users",
            ScalingFactor::AverageRepositories => "average_repositories",
            ScalingFactor::TotalRepoSize => "total_repo_size",
            ScalingFactor::LargeMonorepos => "large_monorepos",
            ScalingFactor::LargestRepoSize => "largest_repo_size",
            ScalingFactor::LargestIndexSize => "largest_index_size",
            ScalingFactor::UserRepoSumRatio => "user_repo_sum_ratio",
        }
    }
}

impl fmt::Display for ScalingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
