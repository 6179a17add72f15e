//! Seeded sampling primitives
//!
//! One explicit, seedable RNG handle backs every draw made during
//! generation. The handle is passed into every call; nothing in the crate
//! reaches for a global or thread-local source, which keeps whole runs
//! reproducible from a single seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::epidemiology::Gender;
use crate::error::{Result, SynthesisError};

/// Seedable uniform/Bernoulli source threaded through generation
#[derive(Debug)]
pub struct SamplerRng {
    rng: StdRng,
}

impl SamplerRng {
    /// Create a sampler from an explicit seed
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in [0, 1)
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Bernoulli draw; probabilities above one saturate to a certain draw
    pub fn bernoulli(&mut self, p: f64) -> u8 {
        let p = if p > 1.0 { 1.0 } else { p };
        u8::from(self.rng.random::<f64>() < p)
    }

    /// Uniform integer in [low, high)
    pub fn integer_between(&mut self, low: i64, high: i64) -> i64 {
        self.rng.random_range(low..high)
    }

    /// Normal draw with the given mean and standard deviation
    pub fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        match Normal::new(mean, sd.max(f64::MIN_POSITIVE)) {
            Ok(dist) => self.rng.sample(dist),
            Err(_) => mean,
        }
    }

    /// Choose one item index by weight
    pub fn weighted_index(&mut self, weights: &[f64]) -> Result<usize> {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(SynthesisError::configuration(
                "weighted choice over non-positive total weight",
            ));
        }
        let mut remaining = self.rng.random::<f64>() * total;
        for (i, w) in weights.iter().enumerate() {
            remaining -= w;
            if remaining < 0.0 {
                return Ok(i);
            }
        }
        Ok(weights.len() - 1)
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Continuous attributes supplied by the distribution collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuousAttribute {
    /// Standing height in centimetres
    Height,
    /// Body weight in kilograms
    Weight,
    /// Serum creatinine in micromoles per litre
    Creatinine,
    /// Self-reported health on a 1-5 scale
    SelfReportedHealth,
    /// Timed-up-and-go test in seconds
    TimedUpAndGo,
    /// Probability of reporting the date incorrectly
    DateErrorRate,
}

/// Distribution-backed source of continuous patient attributes.
///
/// Any implementation is acceptable as long as draws are consistent with the
/// configured mean and spread for the (band, gender) stratum.
pub trait ContinuousSampler: Sync {
    /// Draw one value for `attribute` in the given stratum
    fn draw(
        &self,
        attribute: ContinuousAttribute,
        band_index: usize,
        gender: Gender,
        rng: &mut SamplerRng,
    ) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SamplerRng::from_seed(99);
        let mut b = SamplerRng::from_seed(99);
        for _ in 0..32 {
            assert_eq!(a.uniform(), b.uniform());
        }
    }

    #[test]
    fn bernoulli_saturates_above_one() {
        let mut rng = SamplerRng::from_seed(1);
        for _ in 0..16 {
            assert_eq!(rng.bernoulli(1.6), 1);
        }
    }

    #[test]
    fn weighted_index_respects_zero_weights() {
        let mut rng = SamplerRng::from_seed(7);
        for _ in 0..32 {
            let i = rng.weighted_index(&[0.0, 1.0, 0.0]).unwrap();
            assert_eq!(i, 1);
        }
    }

    #[test]
    fn weighted_index_rejects_empty_mass() {
        let mut rng = SamplerRng::from_seed(7);
        assert!(rng.weighted_index(&[0.0, 0.0]).is_err());
    }
}
