//! Rejection sampling of tap positions over the screen rectangle.
use glam::{UVec2, Vec2};

use crate::error::{Error, Result};
use crate::exclusion::ExclusionSet;
use crate::sampling::{next_down, RandomSource};

/// An accepted tap position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Position in screen pixels, inside `[0, width) x [0, height)`.
    pub position: Vec2,
    /// Number of candidates drawn, including the accepted one.
    pub attempts: u32,
}

/// Draws uniform positions until one falls outside every excluded region.
///
/// Without `max_attempts` the loop is unbounded, so an exclusion set covering
/// the whole screen spins until cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionSampler {
    /// Upper bound on rejected candidates before giving up.
    pub max_attempts: Option<u32>,
}

impl RejectionSampler {
    /// Create an unbounded sampler.
    pub fn new() -> Self {
        Self { max_attempts: None }
    }

    /// Sets the rejection ceiling.
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Samples one position for a screen of `size`.
    pub fn sample(
        &self,
        size: UVec2,
        exclusions: &ExclusionSet,
        random: &mut dyn RandomSource,
    ) -> Result<Candidate> {
        self.sample_until(size, exclusions, random, || false)
    }

    /// Like [`RejectionSampler::sample`], but polls `cancelled` before every draw.
    pub fn sample_until<C>(
        &self,
        size: UVec2,
        exclusions: &ExclusionSet,
        random: &mut dyn RandomSource,
        cancelled: C,
    ) -> Result<Candidate>
    where
        C: Fn() -> bool,
    {
        if size.x == 0 || size.y == 0 {
            return Err(Error::EmptyScreen {
                width: size.x,
                height: size.y,
            });
        }

        let w = size.x as f32;
        let h = size.y as f32;
        // Keep strictly inside right/bottom edges after float rounding.
        let max_x = next_down(w);
        let max_y = next_down(h);

        let mut attempts: u32 = 0;
        loop {
            if cancelled() {
                return Err(Error::Cancelled);
            }

            let x = (w * random.next_unit_float()).min(max_x);
            let y = (h * random.next_unit_float()).min(max_y);
            attempts = attempts.saturating_add(1);

            let position = Vec2::new(x, y);
            if !exclusions.contains_position(position) {
                return Ok(Candidate { position, attempts });
            }

            if let Some(limit) = self.max_attempts {
                if attempts >= limit {
                    return Err(Error::DegenerateExclusion { attempts });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::geometry::Rect;
    use crate::sampling::{SeededRandom, SequenceRandom};

    fn left_half_excluded() -> ExclusionSet {
        let mut set = ExclusionSet::new();
        set.add(Rect::new(0, 0, 500, 2000));
        set
    }

    #[test]
    fn accepted_positions_avoid_exclusions() {
        let exclusions = left_half_excluded();
        let mut random = SeededRandom::new(42);
        let sampler = RejectionSampler::new();

        for _ in 0..1000 {
            let c = sampler
                .sample(UVec2::new(1000, 2000), &exclusions, &mut random)
                .expect("right half is reachable");
            assert!(
                (500.0..1000.0).contains(&c.position.x),
                "x = {} inside excluded half",
                c.position.x
            );
            assert!((0.0..2000.0).contains(&c.position.y));
            assert!(c.attempts >= 1);
        }
    }

    #[test]
    fn forced_sequence_skips_excluded_candidates() {
        let exclusions = left_half_excluded();
        // (0.1, 0.5) lands at x=100 and is rejected; (0.75, 0.25) is accepted.
        let mut random = SequenceRandom::new(vec![0.1, 0.5, 0.75, 0.25]);
        let c = RejectionSampler::new()
            .sample(UVec2::new(1000, 2000), &exclusions, &mut random)
            .expect("second candidate accepted");
        assert_eq!(c.position, Vec2::new(750.0, 500.0));
        assert_eq!(c.attempts, 2);
        assert_eq!(random.drawn(), 4);
    }

    #[test]
    fn boundary_pixel_is_outside_half_open_rect() {
        let exclusions = left_half_excluded();
        let mut random = SequenceRandom::new(vec![0.5, 0.0]);
        let c = RejectionSampler::new()
            .sample(UVec2::new(1000, 2000), &exclusions, &mut random)
            .expect("x = 500 is outside [0, 500)");
        assert_eq!(c.position.x, 500.0);
        assert_eq!(c.attempts, 1);
    }

    #[test]
    fn full_coverage_hits_ceiling() {
        let mut exclusions = ExclusionSet::new();
        exclusions.add(Rect::new(0, 0, 100, 100));
        let mut random = SeededRandom::new(1);
        let err = RejectionSampler::new()
            .with_max_attempts(Some(32))
            .sample(UVec2::new(100, 100), &exclusions, &mut random)
            .expect_err("no reachable pixel");
        assert!(matches!(err, Error::DegenerateExclusion { attempts: 32 }));
    }

    #[test]
    fn cancellation_breaks_an_unbounded_spin() {
        let mut exclusions = ExclusionSet::new();
        exclusions.add(Rect::new(0, 0, 100, 100));
        let mut random = SeededRandom::new(1);
        let polls = Cell::new(0u32);
        let err = RejectionSampler::new()
            .sample_until(UVec2::new(100, 100), &exclusions, &mut random, || {
                polls.set(polls.get() + 1);
                polls.get() > 500
            })
            .expect_err("cancelled");
        assert!(matches!(err, Error::Cancelled));
        assert_eq!(polls.get(), 501);
    }

    #[test]
    fn empty_screen_is_reported_without_drawing() {
        let mut random = SequenceRandom::new(vec![0.5]);
        let err = RejectionSampler::new()
            .sample(UVec2::new(0, 10), &ExclusionSet::new(), &mut random)
            .expect_err("no area");
        assert!(matches!(err, Error::EmptyScreen { width: 0, height: 10 }));
        assert_eq!(random.drawn(), 0);
    }

    #[test]
    fn largest_unit_float_stays_inside_screen() {
        let mut random = SequenceRandom::new(vec![next_down(1.0)]);
        let size = UVec2::new(16_777_216, 3);
        let c = RejectionSampler::new()
            .sample(size, &ExclusionSet::new(), &mut random)
            .expect("no exclusions");
        assert!(c.position.x < size.x as f32);
        assert!(c.position.y < size.y as f32);
    }

    #[test]
    fn determinism_for_same_seed() {
        let exclusions = left_half_excluded();
        let size = UVec2::new(1000, 2000);
        let sampler = RejectionSampler::new();

        let run = |seed| {
            let mut random = SeededRandom::new(seed);
            (0..32)
                .map(|_| sampler.sample(size, &exclusions, &mut random).unwrap())
                .map(|c| c.position)
                .collect::<Vec<_>>()
        };

        assert_eq!(run(123), run(123));
        assert_ne!(run(123), run(456));
    }
}
