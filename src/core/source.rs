use crate::core::polarization::Basis;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Per-run random stream.
///
/// Every simulation owns exactly one `RandomSource`, so concurrent runs never
/// share generator state. A seeded source replays the same draws on every
/// platform; an unseeded one is drawn from the thread-local entropy source.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl RandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self { rng, seed }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Returns the seed this stream was created with, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn bit(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    pub fn basis(&mut self) -> Basis {
        Basis::from_bit(self.bit())
    }

    /// Uniform sample in `[0.0, 1.0)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random()
    }

    pub fn bits(&mut self, n: usize) -> Vec<bool> {
        (0..n).map(|_| self.bit()).collect()
    }

    pub fn bases(&mut self, n: usize) -> Vec<Basis> {
        (0..n).map(|_| self.basis()).collect()
    }

    /// Draws `amount` distinct indices from `0..length`.
    ///
    /// `amount` is capped at `length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }
}
