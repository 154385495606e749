//! Shard addressing.
//!
//! A run owns one residue class of the identifier space: logical id `n` is
//! published as `n * count + offset`. Shards never communicate; they only
//! share the seed formula in [`ShardSpec::seed_for`].

use std::fmt;
use thiserror::Error;

/// Position of a generator instance within a sharded deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShardSpec {
    count: u64,
    offset: u64,
}

impl ShardSpec {
    /// A single, unsharded run.
    pub const SINGLE: Self = ShardSpec {
        count: 1,
        offset: 0,
    };

    /// Create a shard position, checking `count >= 1` and `offset < count`.
    pub fn new(count: u64, offset: u64) -> Result<Self, ShardError> {
        if count == 0 {
            return Err(ShardError::ZeroCount);
        }
        if offset >= count {
            return Err(ShardError::OffsetOutOfRange { offset, count });
        }
        Ok(Self { count, offset })
    }

    /// Total number of shards.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Index of this shard, in `0..count`.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Map a logical id to its sharded id.
    ///
    /// Callers must have checked the id range with
    /// [`ShardSpec::checked_to_shard`].
    pub fn to_shard(&self, id: u64) -> u64 {
        id * self.count + self.offset
    }

    /// Map a logical id to its sharded id, or `None` on overflow.
    pub fn checked_to_shard(&self, id: u64) -> Option<u64> {
        id.checked_mul(self.count)?.checked_add(self.offset)
    }

    /// Effective RNG seed of this shard for a workload's base seed.
    pub fn seed_for(&self, base_seed: u64) -> u64 {
        base_seed.wrapping_add(self.offset)
    }
}

impl Default for ShardSpec {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl fmt::Display for ShardSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.offset, self.count)
    }
}

/// Errors constructing a [`ShardSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShardError {
    /// No shards at all.
    #[error("Shard count must be at least 1")]
    ZeroCount,

    /// The offset names a shard past the last one.
    #[error("Shard offset {offset} is out of range for {count} shards")]
    OffsetOutOfRange { offset: u64, count: u64 },
}
