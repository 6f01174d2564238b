//! Scaling engine
//!
//! Converts scalar inputs into per-service resource envelopes:
//! curve evaluation, envelope merging, quantization, pod replica
//! synchronization and deployment-wide aggregation.

mod aggregate;
mod combine;
mod factor;
mod interpolate;
mod pods;
mod rounding;
mod storage;


pub use aggregate::{aggregate, LIMIT_GAP_SHARE};
pub use combine::{combine, combine_all};
pub use factor::ScalingFactor;
pub use interpolate::interpolate;
pub use pods::{synchronize_replicas, PodGroup};
pub use rounding::{resource_round, round_range, FRACTIONAL_STEP};
pub use storage::StorageRule;
