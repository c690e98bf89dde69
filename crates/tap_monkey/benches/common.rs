#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::UVec2;

/// Portrait phone resolution used by every bench.
pub const PHONE: UVec2 = UVec2::new(1080, 1920);

/// Taps per measured iteration for batched benches.
pub const TAP_BATCH: usize = 256;

/// Criterion tuned for short, allocation-free loops.
pub fn tap_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(30)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(3))
        .noise_threshold(0.03)
}

pub fn taps(count: usize) -> Throughput {
    Throughput::Elements(count.max(1) as u64)
}
