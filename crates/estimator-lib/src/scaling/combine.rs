//! Merging of per-curve partial envelopes into one service envelope
//!
//! Curves for a service are folded left to right in declaration order. Each
//! field group (replicas, CPU, memory, ephemeral storage, persistent storage)
//! is owned by the first curve that sets it; later curves cannot overwrite it.

use super::rounding::{resource_round, round_range};
use crate::models::{PartialEnvelope, ServiceEnvelope};

/// Fold one partial result into an accumulated envelope
///
/// Resource pairs and storage are quantized when adopted. The contact-support
/// flag is sticky: once any curve raises it, it stays raised.
pub fn combine(acc: ServiceEnvelope, partial: &PartialEnvelope) -> ServiceEnvelope {
    let mut out = acc;

    if out.replicas == 0 {
        out.replicas = partial.replicas;
    }
    if out.cpu.is_zero() {
        out.cpu = round_range(partial.cpu);
    }
    if out.memory.is_zero() {
        out.memory = round_range(partial.memory);
    }
    if partial.ephemeral.limit > 0.0 && out.ephemeral.is_zero() {
        out.ephemeral = round_range(partial.ephemeral);
    }
    if partial.storage > 0.0 && out.storage == 0.0 {
        out.storage = resource_round(partial.storage);
    }
    out.contact_support = out.contact_support || partial.contact_support;

    out
}

/// Fold an ordered sequence of partial results starting from an empty envelope
pub fn combine_all<'a>(partials: impl IntoIterator<Item = &'a PartialEnvelope>) -> ServiceEnvelope {
    partials
        .into_iter()
        .fold(ServiceEnvelope::default(), |acc, partial| combine(acc, partial))
}
