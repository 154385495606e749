//! Random distributions driving session shape and selection.
//!
//! Every draw goes through the run's single seeded RNG so a workload is a
//! pure function of its seed.

use crate::config::ConfigError;
use rand::Rng;
use rand_distr::{Distribution, Normal, Zipf};
use shoptrace_types::ProductId;

/// Zipf exponent used for product popularity and session selection.
const ZIPF_SKEW: f64 = 1.0;

/// Number of operations of one kind in a session.
///
/// Normally distributed, rounded to the nearest integer and clamped at zero.
#[derive(Clone, Debug)]
pub struct ActionCount {
    normal: Normal<f64>,
}

impl ActionCount {
    pub fn new(name: &'static str, average: f64, sd: f64) -> Result<Self, ConfigError> {
        let normal = Normal::new(average, sd).map_err(|e| ConfigError::Distribution {
            name,
            reason: e.to_string(),
        })?;
        Ok(Self { normal })
    }

    /// Draw a count.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        self.normal.sample(rng).round().max(0.0) as usize
    }
}

/// Product popularity: Zipf over the catalog, so a small head of products
/// receives most of the traffic.
#[derive(Clone, Debug)]
pub struct ProductPopularity {
    zipf: Zipf<f64>,
    count: u64,
}

impl ProductPopularity {
    pub fn new(product_count: u64) -> Result<Self, ConfigError> {
        let zipf = Zipf::new(product_count, ZIPF_SKEW).map_err(|e| ConfigError::Distribution {
            name: "product popularity",
            reason: e.to_string(),
        })?;
        Ok(Self {
            zipf,
            count: product_count,
        })
    }

    /// Draw a product id. Rank 1 maps to product 0.
    pub fn sample(&self, rng: &mut impl Rng) -> ProductId {
        let rank = self.zipf.sample(rng) as u64;
        ProductId(rank.saturating_sub(1).min(self.count - 1))
    }
}

/// Draw a 0-based Zipf rank over `n` items, or `None` when there is nothing
/// to choose from.
pub fn zipf_index(n: usize, rng: &mut impl Rng) -> Option<usize> {
    let zipf = Zipf::new(n as u64, ZIPF_SKEW).ok()?;
    let rank = zipf.sample(rng) as usize;
    Some(rank.saturating_sub(1).min(n - 1))
}
