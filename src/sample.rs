//! Shuffle-and-truncate sampling of the fetched records.

use crate::ImageRecord;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Picks a random, bounded prefix of the records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    /// Maximum number of records kept
    pub limit: usize,
    /// Fixed seed for reproducible builds
    pub seed: Option<u64>,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            limit: 160,
            seed: None,
        }
    }
}

impl Sampler {
    /// Permute the records uniformly at random and keep `min(len, limit)`
    pub fn sample(&self, records: Vec<ImageRecord>) -> Vec<ImageRecord> {
        match self.seed {
            Some(seed) => self.sample_with(records, &mut StdRng::seed_from_u64(seed)),
            None => self.sample_with(records, &mut StdRng::from_entropy()),
        }
    }

    /// Same as [`Sampler::sample`] with a caller-provided generator
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        mut records: Vec<ImageRecord>,
        rng: &mut R,
    ) -> Vec<ImageRecord> {
        records.shuffle(rng);
        records.truncate(self.limit);
        records
    }
}
