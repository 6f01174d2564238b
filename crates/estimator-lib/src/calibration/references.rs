//! Known-good deployment configurations
//!
//! Each curve records how one part of a service's envelope grows with one
//! scaling factor. Curves for the same service are listed in merge order:
//! the first curve to set a field group owns it.
//!
//! Every curve is non-decreasing in every field.

use super::ServiceCurve;
use crate::input::{
    Feature, AVERAGE_REPOSITORIES_RANGE, LARGEST_INDEX_SIZE_RANGE, LARGEST_REPO_SIZE_RANGE,
    LARGE_MONOREPOS_RANGE, USERS_RANGE, USER_REPO_SUM_RATIO_RANGE,
};
use crate::models::ReferencePoint as P;
use crate::scaling::ScalingFactor::*;

/// The compiled-in curve catalogue in declaration order
pub fn reference_curves() -> Vec<ServiceCurve> {
    let repos_max = AVERAGE_REPOSITORIES_RANGE.max;
    let repos_min = AVERAGE_REPOSITORIES_RANGE.min;
    let monorepos_max = LARGE_MONOREPOS_RANGE.max;
    let monorepos_min = LARGE_MONOREPOS_RANGE.min;

    vec![
        // Frontend scales with engaged users.
        ServiceCurve::new(
            "frontend",
            EngagedUsers,
            vec![
                P::at(USERS_RANGE.max).replicas(9).cpu(2.0, 2.0).memory(2.0, 4.0), // projection
                P::at(1750.0 + 1425.0 * 2.0).replicas(5).cpu(2.0, 2.0).memory(2.0, 4.0), // projection
                P::at(1750.0 + 1425.0).replicas(4).cpu(2.0, 2.0).memory(2.0, 4.0), // projection
                P::at(7000.0 * 0.25).replicas(3).cpu(2.0, 2.0).memory(2.0, 4.0),
                P::at(1300.0 * 0.25).replicas(3).cpu(2.0, 2.0).memory(2.0, 4.0),
                P::at(USERS_RANGE.min).replicas(1).cpu(2.0, 2.0).memory(2.0, 4.0), // bare minimum
            ],
        ),
        // Gitserver scales with the number of average repositories.
        ServiceCurve::new(
            "gitserver",
            AverageRepositories,
            vec![
                P::at(repos_max).replicas(5).cpu(4.0, 8.0).memory(4.0, 8.0), // projection
                P::at(15_000.0 + 13_500.0).replicas(4).cpu(4.0, 8.0).memory(4.0, 8.0), // projection
                P::at(15_000.0).replicas(3).cpu(4.0, 8.0).memory(4.0, 8.0),
                P::at(1500.0).replicas(2).cpu(4.0, 8.0).memory(4.0, 8.0),
                P::at(repos_min).replicas(1).cpu(4.0, 8.0).memory(4.0, 8.0), // bare minimum
            ],
        ),
        // Searcher replicas follow average repositories, its resources follow
        // large monorepos, and its archive cache follows the largest repository.
        ServiceCurve::new(
            "searcher",
            AverageRepositories,
            vec![
                P::at(repos_max).replicas(12), // projection
                P::at(15_000.0 + 13_500.0).replicas(9), // projection
                P::at(15_000.0).replicas(6),
                P::at(1500.0).replicas(3),
                P::at(repos_min).replicas(1),
            ],
        ),
        ServiceCurve::new(
            "searcher",
            LargeMonorepos,
            vec![
                P::at(monorepos_max).cpu(0.5, 2.0).memory(1.0, 4.0), // speculative
                P::at(1.0).cpu(0.5, 2.0).memory(1.0, 4.0), // speculative
                P::at(monorepos_min).cpu(0.5, 2.0).memory(0.5, 2.0),
            ],
        ),
        ServiceCurve::new(
            "searcher",
            LargestRepoSize,
            vec![
                P::at(LARGEST_REPO_SIZE_RANGE.max).ephemeral(10_000.0, 20_000.0), // estimated: 2x/4x the largest repo
                P::at(100.0).ephemeral(200.0, 400.0), // estimated
                P::at(LARGEST_REPO_SIZE_RANGE.min).ephemeral(2.0, 4.0), // estimated floor
            ],
        ),
        // Symbols: same split as searcher; the ctags cache follows the largest repository.
        ServiceCurve::new(
            "symbols",
            AverageRepositories,
            vec![
                P::at(repos_max).replicas(8), // projection
                P::at(15_000.0 + 13_500.0).replicas(6), // projection
                P::at(15_000.0).replicas(4),
                P::at(1500.0).replicas(2),
                P::at(repos_min).replicas(1),
            ],
        ),
        ServiceCurve::new(
            "symbols",
            LargeMonorepos,
            vec![
                P::at(monorepos_max).cpu(2.0, 4.0).memory(1.0, 4.0),
                P::at(1.0).cpu(2.0, 4.0).memory(1.0, 4.0),
                P::at(monorepos_min).cpu(0.5, 2.0).memory(0.5, 2.0),
            ],
        ),
        ServiceCurve::new(
            "symbols",
            LargestRepoSize,
            vec![
                P::at(LARGEST_REPO_SIZE_RANGE.max).ephemeral(5000.0, 10_000.0), // estimated: 1x/2x the largest repo
                P::at(100.0).ephemeral(100.0, 200.0), // estimated
                P::at(LARGEST_REPO_SIZE_RANGE.min).ephemeral(2.0, 4.0), // estimated floor
            ],
        ),
        // Replacer scales nearly identically to searcher.
        ServiceCurve::new(
            "replacer",
            AverageRepositories,
            vec![
                P::at(repos_max).replicas(12), // projection
                P::at(15_000.0 + 13_500.0).replicas(9), // projection
                P::at(15_000.0).replicas(6),
                P::at(1500.0).replicas(3),
                P::at(repos_min).replicas(1),
            ],
        ),
        ServiceCurve::new(
            "replacer",
            LargeMonorepos,
            vec![
                P::at(monorepos_max).cpu(2.0, 4.0).memory(2.0, 2.0), // very speculative
                P::at(1.0).cpu(1.0, 4.0).memory(1.0, 1.0), // very speculative
                P::at(monorepos_min).cpu(0.5, 4.0).memory(0.5, 0.5),
            ],
        ),
        // zoekt-indexserver memory depends on whether it must index large
        // monorepos; CPU and replicas depend on how many repositories it indexes.
        ServiceCurve::new(
            "zoekt-indexserver",
            LargeMonorepos,
            vec![
                P::at(monorepos_max).memory(16.0, 16.0), // speculative
                P::at(1.0).memory(16.0, 16.0),
                P::at(monorepos_min).memory(4.0, 8.0),
            ],
        ),
        ServiceCurve::new(
            "zoekt-indexserver",
            AverageRepositories,
            vec![
                P::at(repos_max).replicas(2).cpu(6.0, 12.0), // speculative
                P::at(17_000.0).replicas(2).cpu(4.0, 8.0),
                P::at(repos_min).replicas(1).cpu(4.0, 8.0),
            ],
        ),
        // zoekt-webserver memory and replicas follow the repositories it
        // serves; CPU follows the users it serves.
        ServiceCurve::new(
            "zoekt-webserver",
            AverageRepositories,
            vec![
                P::at(repos_max).replicas(2).memory(80.0, 80.0),
                P::at(17_000.0).replicas(2).memory(50.0, 50.0),
                // Measured at 64G; held under the 17000 point so memory never
                // drops as repositories grow.
                P::at(11_000.0).replicas(1).memory(48.0, 48.0),
                P::at(1500.0).replicas(1).memory(34.0, 34.0),
                P::at(repos_min).replicas(1).memory(4.0, 8.0),
            ],
        ),
        ServiceCurve::new(
            "zoekt-webserver",
            EngagedUsers,
            vec![
                P::at(USERS_RANGE.max).cpu(192.0, 192.0), // projection
                P::at(USERS_RANGE.max * 0.25).cpu(48.0, 48.0), // projection
                P::at(210.0 * 4.0).cpu(16.0, 16.0),
                P::at(1300.0 * 0.5).cpu(12.0, 12.0),
                P::at(USERS_RANGE.min).cpu(0.5, 2.0),
            ],
        ),
        // syntect-server runs 4 workers of up to 1.1G each. Past 4.4G total
        // it scales linearly with request load, CPU being the bottleneck.
        ServiceCurve::new(
            "syntect-server",
            EngagedUsers,
            vec![
                P::at(USERS_RANGE.max).replicas(1).cpu(12.0, 64.0).memory(6.0, 10.0), // speculative
                P::at(8000.0).replicas(1).cpu(6.0, 32.0).memory(5.0, 9.0), // speculative
                P::at(6000.0).replicas(1).cpu(4.0, 16.0).memory(4.0, 8.0), // speculative
                P::at(4000.0).replicas(1).cpu(2.0, 8.0).memory(3.0, 7.0), // speculative
                P::at(2000.0).replicas(1).cpu(0.25, 4.0).memory(2.0, 6.0),
                P::at(USERS_RANGE.min).replicas(1).cpu(0.25, 4.0).memory(2.0, 6.0),
            ],
        ),
        // Background worker load grows with users and repositories together.
        ServiceCurve::new(
            "worker",
            UserRepoSumRatio,
            vec![
                P::at(USER_REPO_SUM_RATIO_RANGE.max).replicas(1).cpu(2.0, 4.0).memory(4.0, 8.0), // estimated
                P::at(20.0).replicas(1).cpu(1.0, 2.0).memory(4.0, 4.0), // estimated
                P::at(USER_REPO_SUM_RATIO_RANGE.min).replicas(1).cpu(0.5, 2.0).memory(2.0, 4.0), // estimated floor
            ],
        ),
        // Code intelligence: upload store and index processing.
        ServiceCurve::new(
            "minio",
            LargestIndexSize,
            vec![
                P::at(LARGEST_INDEX_SIZE_RANGE.max).replicas(1).cpu(1.0, 1.0).memory(1.0, 1.0), // estimated
                P::at(LARGEST_INDEX_SIZE_RANGE.min).replicas(1).cpu(1.0, 1.0).memory(0.5, 0.5), // estimated floor
            ],
        )
        .requires(Feature::CodeIntel),
        ServiceCurve::new(
            "precise-code-intel-worker",
            LargestIndexSize,
            vec![
                P::at(LARGEST_INDEX_SIZE_RANGE.max).replicas(2).cpu(4.0, 4.0).memory(41.0, 41.0), // estimated
                P::at(10.0).replicas(2).cpu(2.0, 2.0).memory(8.0, 8.0), // estimated
                P::at(LARGEST_INDEX_SIZE_RANGE.min).replicas(1).cpu(2.0, 2.0).memory(4.0, 4.0), // estimated floor
            ],
        )
        .requires(Feature::CodeIntel),
    ]
}
