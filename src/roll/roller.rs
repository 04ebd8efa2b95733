use std::num::NonZeroU64;

use rand::Rng;

/// Source of individual die results.
pub trait Roller {
    /// Uniform draw from `1..=sides`.
    fn roll(&mut self, sides: NonZeroU64) -> u64;
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, sides: NonZeroU64) -> u64 {
        self.gen_range(1..=sides.get())
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;
