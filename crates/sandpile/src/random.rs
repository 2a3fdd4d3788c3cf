//! Normal-distribution sampling used to place dropped grains.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of normally distributed samples.
pub trait RandomSource {
    /// One sample from `Normal(mean, std_dev)`.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        (**self).normal(mean, std_dev)
    }
}

/// `StdRng`-backed source. A fixed seed replays the same sample sequence;
/// no seed draws one from the operating system.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl RandomSource for SeededSource {
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std_dev * z
    }
}

/// Replays a fixed list of standard samples, cycling when exhausted.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedSource {
    samples: Vec<f64>,
    next: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(samples: Vec<f64>) -> Self {
        assert!(!samples.is_empty(), "scripted source needs samples");
        Self { samples, next: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z = self.samples[self.next % self.samples.len()];
        self.next += 1;
        mean + std_dev * z
    }
}
