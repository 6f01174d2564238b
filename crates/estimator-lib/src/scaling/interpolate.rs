//! Piecewise-linear evaluation of a calibration curve
//!
//! Values between two reference points are interpolated field by field.
//! Values above the largest reference point are never extrapolated: the top
//! point is returned unchanged and flagged for manual sizing.

use crate::models::{PartialEnvelope, ReferencePoint, ResourceRange};

/// Evaluate an ascending-sorted curve at `x`
///
/// # Arguments
/// * `points` - Reference points sorted ascending by `value`, at least one
/// * `x` - Query value, expected to be non-negative
///
/// # Returns
/// * The interpolated envelope when `x` lies at or below the largest point
/// * The largest point verbatim with `contact_support` set otherwise
///
/// Storage is never interpolated; it is carried from the lower bracket point.
pub fn interpolate(points: &[ReferencePoint], x: f64) -> PartialEnvelope {
    let Some(upper) = points.iter().position(|p| p.value >= x) else {
        return match points.last() {
            Some(top) => PartialEnvelope {
                contact_support: true,
                ..PartialEnvelope::from_point(top)
            },
            None => PartialEnvelope::default(),
        };
    };

    let b = &points[upper];
    let a = if upper > 0 { &points[upper - 1] } else { b };

    let t = (x - a.value) / or_one(b.value - a.value);
    let replica_delta = (b.replicas as f64 - a.replicas as f64) * t;

    PartialEnvelope {
        replicas: (a.replicas as f64 + replica_delta.round()).max(0.0) as u32,
        cpu: lerp(a.cpu, b.cpu, t),
        memory: lerp(a.memory, b.memory, t),
        ephemeral: lerp(a.ephemeral, b.ephemeral, t),
        storage: a.storage,
        contact_support: false,
    }
}

/// `t == 1` returns `b` exactly so calibrated values survive float error
fn lerp(a: ResourceRange, b: ResourceRange, t: f64) -> ResourceRange {
    if t >= 1.0 {
        b
    } else {
        a.add(b.sub(a).scale(t))
    }
}

/// Zero-width brackets only happen when `a` and `b` are the same point
fn or_one(v: f64) -> f64 {
    if v == 0.0 {
        1.0
    } else {
        v
    }
}
