//! Seeded rejection sampling of points in free space.
//!
//! Model
//! - Draw uniformly in the boundary's bounding box; keep a draw iff some
//!   cell contains it. Acceptance rate is the free-area fraction of the box.
//! - Determinism uses a replay token `(seed, index)` mixed into one RNG, so
//!   a sample stream can be reproduced from its token alone.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::decomp::CellId;
use crate::geom2::Point;
use crate::planner::Decomposition;

/// Replay token for a sample stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finaliser
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Draws free points from one decomposition.
pub struct FreeSpaceSampler<'a> {
    decomp: &'a Decomposition,
    rng: StdRng,
    lo: Point,
    hi: Point,
    max_attempts: usize,
}

impl<'a> FreeSpaceSampler<'a> {
    pub fn new(decomp: &'a Decomposition, tok: ReplayToken) -> Self {
        let (lo, hi) = decomp.scene().boundary().bounds();
        Self {
            decomp,
            rng: tok.to_std_rng(),
            lo,
            hi,
            max_attempts: 1000,
        }
    }

    /// Rejection budget per accepted sample.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Next free point and its cell; `None` once a whole budget is rejected.
    pub fn sample(&mut self) -> Option<(Point, CellId)> {
        for _ in 0..self.max_attempts {
            let p = Point::new(
                self.rng.gen_range(self.lo.x..=self.hi.x),
                self.rng.gen_range(self.lo.y..=self.hi.y),
            );
            if let Ok(cell) = self.decomp.locate(p) {
                return Some((p, cell));
            }
        }
        None
    }

    /// Up to `n` samples (fewer if the budget runs out).
    pub fn take(&mut self, n: usize) -> Vec<(Point, CellId)> {
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            match self.sample() {
                Some(s) => out.push(s),
                None => break,
            }
        }
        out
    }
}
