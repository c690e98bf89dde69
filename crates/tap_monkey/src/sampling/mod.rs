//! Random tap position generation.
//!
//! This module defines the [`RandomSource`] abstraction, a [`StdRng`](rand::rngs::StdRng)
//! backed implementation, and the [`RejectionSampler`] that turns unit floats
//! into screen positions outside the excluded regions.
use rand::RngCore;

pub mod random;
pub mod rejection;

pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use rejection::{Candidate, RejectionSampler};

const UNIT_FLOAT_BITS: u32 = 24;

/// Generate a random float in the range [0, 1).
///
/// Uses the top 24 bits of a `u32`, which an `f32` mantissa represents
/// exactly, so the result never rounds up to 1.0.
#[inline]
pub fn unit_float(rng: &mut dyn RngCore) -> f32 {
    let bits = rng.next_u32() >> (32 - UNIT_FLOAT_BITS);
    bits as f32 / (1u32 << UNIT_FLOAT_BITS) as f32
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input, useful for
/// ensuring bounds are strictly inside a domain. Handles edge cases
/// safely including very small positive values and zero.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}
