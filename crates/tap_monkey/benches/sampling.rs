mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::UVec2;
use tap_monkey::exclusion::ExclusionSet;
use tap_monkey::geometry::Rect;
use tap_monkey::sampling::{RejectionSampler, SeededRandom};

const SCREEN: UVec2 = common::PHONE;
const COVERAGE_PERCENT: [u32; 5] = [0, 25, 50, 75, 95];
const BATCH: usize = common::TAP_BATCH;

/// Excludes a band from the top of the screen covering `percent` of its area.
fn top_band(percent: u32) -> ExclusionSet {
    let mut set = ExclusionSet::new();
    if percent > 0 {
        let bottom = (SCREEN.y * percent / 100) as i32;
        set.add(Rect::new(0, 0, SCREEN.x as i32, bottom));
    }
    set
}

/// Splits the same coverage into many small tiles to stress the containment scan.
fn tiled(percent: u32, tiles_per_row: u32) -> ExclusionSet {
    let tile_w = SCREEN.x / tiles_per_row;
    let rows = SCREEN.y * percent / 100 / tile_w;
    let mut set = ExclusionSet::new();
    for row in 0..rows {
        for col in 0..tiles_per_row {
            let left = (col * tile_w) as i32;
            let top = (row * tile_w) as i32;
            set.add(Rect::new(left, top, left + tile_w as i32, top + tile_w as i32));
        }
    }
    set
}

fn sampling_coverage_benches(c: &mut Criterion) {
    let sampler = RejectionSampler::new();

    for (label, build) in [
        ("band", top_band as fn(u32) -> ExclusionSet),
        ("tiles", |p| tiled(p, 12)),
    ] {
        let mut group = c.benchmark_group(format!("sampling/rejection/{label}"));
        group.throughput(common::taps(BATCH));

        for &percent in &COVERAGE_PERCENT {
            let exclusions = build(percent);
            let mut random = SeededRandom::new(0xA11CE_u64 ^ percent as u64);

            group.bench_with_input(BenchmarkId::from_parameter(percent), &percent, |b, _| {
                b.iter(|| {
                    for _ in 0..BATCH {
                        let candidate = sampler
                            .sample(SCREEN, &exclusions, &mut random)
                            .expect("coverage below 100%");
                        black_box(candidate.position);
                    }
                });
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = common::tap_criterion();
    targets = sampling_coverage_benches
}
criterion_main!(benches);
