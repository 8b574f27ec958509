use orion_error::prelude::*;
use pf_config::DurationConfig;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::error::{GenReason, GenResult};

/// A named inclusive hour range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub name: String,
    pub min_hours: u32,
    pub max_hours: u32,
}

/// Weighted bucket draw followed by a uniform hour draw inside the bucket.
#[derive(Debug, Clone)]
pub struct DurationSampler {
    buckets: Vec<Bucket>,
    index: WeightedIndex<f64>,
}

impl DurationSampler {
    pub fn new(config: &DurationConfig) -> GenResult<Self> {
        let index = WeightedIndex::new(config.buckets.iter().map(|b| b.probability)).map_err(
            |e| {
                StructError::from(GenReason::Config)
                    .with_detail(format!("duration bucket probabilities: {e}"))
            },
        )?;
        let buckets = config
            .buckets
            .iter()
            .map(|b| Bucket {
                name: b.name.clone(),
                min_hours: b.range.min(),
                max_hours: b.range.max(),
            })
            .collect();
        Ok(Self { buckets, index })
    }

    /// Buckets in declaration order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn bucket(&self, index: usize) -> &Bucket {
        &self.buckets[index]
    }

    /// Index of a bucket drawn by its (normalised) probability.
    pub fn sample_bucket<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.index.sample(rng)
    }

    /// Whole hours drawn uniformly from `[min, max]` of bucket `index`.
    pub fn sample_hours<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> u32 {
        let b = &self.buckets[index];
        rng.random_range(b.min_hours..=b.max_hours)
    }
}
