//! Per-ring segment pattern generation
//!
//! A pattern is one segment kind per angular slice. Placement rules:
//! - The first ring always opens at slices 0 and last, so the ball's fixed
//!   entry angle has a traversable opening on both rotational neighbors.
//! - Every other ring gets one randomly placed pair of adjacent gaps,
//!   guaranteeing a minimum traversable arc width at any rotation.
//! - Danger slices are drawn without replacement from whatever is still
//!   safe, clamped so a config can never over-draw.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Kind of one angular slice of a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Traversable opening; passing through scores
    Gap,
    /// Bounces the ball
    Safe,
    /// Ends the run on contact
    Danger,
}

/// Full per-ring array of segment kinds, one entry per slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    slices: Vec<SegmentKind>,
}

impl Pattern {
    /// Generate a pattern for one ring.
    ///
    /// `min_danger..=max_danger` is the requested danger range; the actual
    /// draw is clamped to the slices still safe after gap placement, so a
    /// degenerate `segment_count` where everything became a gap is a no-op
    /// rather than a failure.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        segment_count: usize,
        danger_enabled: bool,
        is_first_ring: bool,
        min_danger: usize,
        max_danger: usize,
    ) -> Self {
        let mut slices = vec![SegmentKind::Safe; segment_count];

        if is_first_ring {
            // Opening at the ball's fixed entry angle (slice 0 and its
            // counter-clockwise neighbor).
            slices[0] = SegmentKind::Gap;
            slices[segment_count - 1] = SegmentKind::Gap;
        } else {
            // Paired gap at a random position, wrapping around.
            let gap_start = rng.random_range(0..segment_count);
            slices[gap_start] = SegmentKind::Gap;
            slices[(gap_start + 1) % segment_count] = SegmentKind::Gap;
        }

        if danger_enabled {
            let mut safe_indices: Vec<usize> = (0..segment_count)
                .filter(|&i| slices[i] == SegmentKind::Safe)
                .collect();

            let min_danger = min_danger.min(max_danger);
            let num_danger = rng.random_range(min_danger..=max_danger);
            for _ in 0..num_danger {
                if safe_indices.is_empty() {
                    break;
                }
                let idx = rng.random_range(0..safe_indices.len());
                slices[safe_indices.swap_remove(idx)] = SegmentKind::Danger;
            }
        }

        Self { slices }
    }

    /// Number of slices (constant across all rings in a run)
    #[inline]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Kind of slice `i`
    #[inline]
    pub fn kind(&self, i: usize) -> SegmentKind {
        self.slices[i]
    }

    /// Iterate slices in angular order
    pub fn iter(&self) -> impl Iterator<Item = SegmentKind> + '_ {
        self.slices.iter().copied()
    }

    /// Count slices of a given kind
    pub fn count(&self, kind: SegmentKind) -> usize {
        self.slices.iter().filter(|&&k| k == kind).count()
    }

    /// True if slices `g` and `(g+1) % len` are both gaps for some `g`
    pub fn has_adjacent_gap_pair(&self) -> bool {
        let n = self.slices.len();
        (0..n).any(|g| {
            self.slices[g] == SegmentKind::Gap && self.slices[(g + 1) % n] == SegmentKind::Gap
        })
    }

    #[cfg(test)]
    pub(crate) fn from_slices(slices: Vec<SegmentKind>) -> Self {
        Self { slices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_ring_opens_at_entry() {
        let mut rng = Pcg32::seed_from_u64(7);
        let p = Pattern::generate(&mut rng, 8, false, true, 1, 3);
        assert_eq!(p.len(), 8);
        assert_eq!(p.kind(0), SegmentKind::Gap);
        assert_eq!(p.kind(7), SegmentKind::Gap);
        assert_eq!(p.count(SegmentKind::Gap), 2);
        assert_eq!(p.count(SegmentKind::Danger), 0);
    }

    #[test]
    fn test_non_first_ring_has_paired_gap() {
        for seed in 0..64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = Pattern::generate(&mut rng, 8, false, false, 1, 3);
            assert_eq!(p.count(SegmentKind::Gap), 2);
            assert!(p.has_adjacent_gap_pair(), "seed {seed}: gaps not adjacent");
        }
    }

    #[test]
    fn test_danger_count_within_bounds() {
        for seed in 0..64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = Pattern::generate(&mut rng, 8, true, false, 1, 3);
            let danger = p.count(SegmentKind::Danger);
            assert!((1..=3).contains(&danger), "seed {seed}: {danger} danger");
            assert_eq!(p.count(SegmentKind::Gap), 2);
        }
    }

    #[test]
    fn test_danger_draw_clamped_to_remaining_safe() {
        // 3 segments: the gap pair leaves a single safe slice; asking for
        // up to 5 danger must stop at 1.
        for seed in 0..32 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = Pattern::generate(&mut rng, 3, true, false, 5, 5);
            assert!(p.count(SegmentKind::Danger) <= 1);
        }
    }

    #[test]
    fn test_all_gap_ring_is_danger_noop() {
        // 2 segments: the gap pair consumes the whole ring; the danger
        // step must neither loop nor panic.
        let mut rng = Pcg32::seed_from_u64(1);
        let p = Pattern::generate(&mut rng, 2, true, false, 1, 3);
        assert_eq!(p.count(SegmentKind::Gap), 2);
        assert_eq!(p.count(SegmentKind::Danger), 0);
    }

    proptest! {
        #[test]
        fn prop_pattern_length_and_composition(
            seed in any::<u64>(),
            segments in 2usize..24,
            danger_enabled in any::<bool>(),
            is_first in any::<bool>(),
            min_danger in 0usize..6,
            extra in 0usize..6,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let max_danger = min_danger + extra;
            let p = Pattern::generate(
                &mut rng, segments, danger_enabled, is_first, min_danger, max_danger,
            );

            prop_assert_eq!(p.len(), segments);
            prop_assert!(p.has_adjacent_gap_pair());

            let danger = p.count(SegmentKind::Danger);
            if !danger_enabled {
                prop_assert_eq!(danger, 0);
            } else {
                let remaining_safe = segments - p.count(SegmentKind::Gap);
                prop_assert!(danger <= max_danger.min(remaining_safe));
            }

            // Every slice is accounted for.
            let total = p.count(SegmentKind::Gap)
                + p.count(SegmentKind::Safe)
                + p.count(SegmentKind::Danger);
            prop_assert_eq!(total, segments);
        }
    }
}
