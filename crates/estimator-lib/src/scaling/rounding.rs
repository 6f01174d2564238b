//! Quantization of interpolated values into deployable units
//!
//! Values above one round to whole units. Values at or below one round to
//! the nearest quarter so small requests such as 0.17 CPU stay usable
//! instead of collapsing to zero.

use crate::models::ResourceRange;

/// Granularity applied to values at or below one unit
pub const FRACTIONAL_STEP: f64 = 0.25;

/// Round a resource quantity to whole units or quarter units
pub fn resource_round(x: f64) -> f64 {
    if x > 1.0 {
        x.round()
    } else {
        (x / FRACTIONAL_STEP).round() * FRACTIONAL_STEP
    }
}

/// Round both halves of a request/limit pair
pub fn round_range(range: ResourceRange) -> ResourceRange {
    range.map(resource_round)
}
