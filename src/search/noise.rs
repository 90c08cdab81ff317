use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Largest jitter magnitude in centipawns (half a pawn).
pub const JITTER_CP: i32 = 50;

/// Bounded evaluation noise: uniform in `[-JITTER_CP, JITTER_CP]`.
/// Reproducible for a given seed.
#[derive(Clone, Debug)]
pub struct Jitter {
    rng: SmallRng,
}

impl Jitter {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn sample(&mut self) -> i32 {
        self.rng.gen_range(-JITTER_CP..=JITTER_CP)
    }
}

/// Picks one element uniformly, `None` for an empty slice.
pub fn choose_uniform<'a, T>(items: &'a [T], rng: &mut SmallRng) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.gen_range(0..items.len())])
}
