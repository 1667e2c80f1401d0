//! Session random source.
//!
//! The simulation owns exactly one generator. It is injected at construction
//! so tests can swap in `StepRng` or a fixed seed; nothing in the crate reaches
//! for a thread-local or global generator.
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Counting wrapper around the injected generator.
pub struct SimRng {
    inner: Box<dyn RngCore + Send + Sync>,
    draws: u64,
}

impl SimRng {
    /// Deterministic generator for a user-visible seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Generator seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Wrap any generator, typically a mock in tests.
    #[must_use]
    pub fn from_rng<R>(rng: R) -> Self
    where
        R: RngCore + Send + Sync + 'static,
    {
        Self {
            inner: Box::new(rng),
            draws: 0,
        }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl std::fmt::Debug for SimRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimRng")
            .field("draws", &self.draws)
            .finish_non_exhaustive()
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.inner.try_fill_bytes(dest)
    }
}

/// Roll against a probability in `[0, 1]`.
pub fn roll_chance<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    if chance <= 0.0 {
        return false;
    }
    rng.r#gen::<f64>() < chance
}

/// Fair coin flip.
pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    roll_chance(rng, 0.5)
}

/// Weighted random selection returning the index of the chosen option.
/// Zero-weight options are never chosen; `None` when nothing has weight.
pub fn weighted_index<R: Rng + ?Sized>(weights: &[u32], rng: &mut R) -> Option<usize> {
    let total_weight: u64 = weights.iter().map(|weight| u64::from(*weight)).sum();
    if total_weight == 0 {
        return None;
    }

    let roll = rng.gen_range(0..total_weight);
    let mut current_weight = 0_u64;
    for (idx, weight) in weights.iter().enumerate() {
        if *weight == 0 {
            continue;
        }
        current_weight += u64::from(*weight);
        if roll < current_weight {
            return Some(idx);
        }
    }
    None
}
