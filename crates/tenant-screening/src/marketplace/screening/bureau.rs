use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of simulated credit scores, standing in for a credit-bureau call.
pub trait CreditScoreSource {
    /// Returns a score inside `range`.
    fn draw(&mut self, range: RangeInclusive<u16>) -> u16;
}

impl<S: CreditScoreSource + ?Sized> CreditScoreSource for &mut S {
    fn draw(&mut self, range: RangeInclusive<u16>) -> u16 {
        (**self).draw(range)
    }
}

/// Bureau simulation backed by any random number generator.
#[derive(Debug, Clone)]
pub struct SimulatedBureau<R> {
    rng: R,
}

impl<R: RngCore> SimulatedBureau<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl SimulatedBureau<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when a seed is configured, entropy-backed otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: RngCore> CreditScoreSource for SimulatedBureau<R> {
    fn draw(&mut self, range: RangeInclusive<u16>) -> u16 {
        if range.is_empty() {
            return *range.start();
        }
        self.rng.gen_range(range)
    }
}

/// Always reports the same score. Useful for demos and exact-outcome tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedScore(pub u16);

impl CreditScoreSource for FixedScore {
    fn draw(&mut self, range: RangeInclusive<u16>) -> u16 {
        if range.is_empty() {
            return *range.start();
        }
        self.0.clamp(*range.start(), *range.end())
    }
}
