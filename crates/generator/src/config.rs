//! Configuration types for workload generation.

use serde::Deserialize;
use shoptrace_types::ShardSpec;
use thiserror::Error;

/// Configuration for a workload run.
///
/// Deserializes from a workload file; every section is required so a typo in
/// a file fails loudly instead of silently falling back to defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkloadConfig {
    /// Base random seed. Each shard adds its offset to it.
    pub seed: u64,

    /// User population.
    pub user: UserConfig,

    /// Product catalog and stock policy.
    pub product: ProductConfig,

    /// Number of shopping sessions.
    pub session: SessionConfig,

    /// Add/increase cart operations per session.
    pub add_actions: AddActionsConfig,

    /// Remove/decrease cart operations per session.
    pub remove_actions: RemoveActionsConfig,

    /// Extra product views per session.
    pub read_actions: ReadActionsConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    /// Number of unique users.
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductConfig {
    /// Number of unique products.
    pub count: u64,

    /// Stock each product is listed with.
    pub initial_stock: i64,

    /// Units added by one refill.
    pub refill_amount: i64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Total number of shopping sessions.
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddActionsConfig {
    /// Mean add operations per session.
    pub average: f64,

    /// Standard deviation.
    pub sd: f64,

    /// View the product page before each add.
    #[serde(default)]
    pub view_before: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveActionsConfig {
    /// Mean remove operations per session.
    pub average: f64,

    /// Standard deviation.
    pub sd: f64,

    /// Accepted for workload compatibility. The cart line is always
    /// inspected before a removal.
    #[serde(default)]
    pub view_before: bool,

    /// Probability of abandoning the cart instead of checking out.
    pub abort_probability: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadActionsConfig {
    /// Mean additional product views per session.
    pub average: f64,

    /// Standard deviation.
    pub sd: f64,
}

impl Default for WorkloadConfig {
    /// Mixed read/write workload: 1000 users, 200 products, 300 sessions.
    fn default() -> Self {
        Self {
            seed: 12345,
            user: UserConfig { count: 1000 },
            product: ProductConfig {
                count: 200,
                initial_stock: 100,
                refill_amount: 2000,
            },
            session: SessionConfig { count: 300 },
            add_actions: AddActionsConfig {
                average: 11.0,
                sd: 2.0,
                view_before: false,
            },
            remove_actions: RemoveActionsConfig {
                average: 3.0,
                sd: 1.0,
                view_before: false,
                abort_probability: 0.05,
            },
            read_actions: ReadActionsConfig {
                average: 12.0,
                sd: 5.0,
            },
        }
    }
}

impl WorkloadConfig {
    /// Set the base random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of users.
    pub fn with_users(mut self, count: u64) -> Self {
        self.user.count = count;
        self
    }

    /// Set the number of products.
    pub fn with_products(mut self, count: u64) -> Self {
        self.product.count = count;
        self
    }

    /// Set the initial stock and refill size.
    pub fn with_stock(mut self, initial_stock: i64, refill_amount: i64) -> Self {
        self.product.initial_stock = initial_stock;
        self.product.refill_amount = refill_amount;
        self
    }

    /// Set the number of sessions.
    pub fn with_sessions(mut self, count: u64) -> Self {
        self.session.count = count;
        self
    }

    /// Set the add-operation distribution.
    pub fn with_add_actions(mut self, average: f64, sd: f64) -> Self {
        self.add_actions.average = average;
        self.add_actions.sd = sd;
        self
    }

    /// View products before adding them.
    pub fn with_view_before_add(mut self, view_before: bool) -> Self {
        self.add_actions.view_before = view_before;
        self
    }

    /// Set the remove-operation distribution.
    pub fn with_remove_actions(mut self, average: f64, sd: f64) -> Self {
        self.remove_actions.average = average;
        self.remove_actions.sd = sd;
        self
    }

    /// Set the cart abandonment probability.
    pub fn with_abort_probability(mut self, probability: f64) -> Self {
        self.remove_actions.abort_probability = probability;
        self
    }

    /// Set the additional product view distribution.
    pub fn with_read_actions(mut self, average: f64, sd: f64) -> Self {
        self.read_actions.average = average;
        self.read_actions.sd = sd;
        self
    }

    /// Check the configuration before any generation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user.count == 0 {
            return Err(ConfigError::ZeroCount { section: "user" });
        }
        if self.product.count == 0 {
            return Err(ConfigError::ZeroCount { section: "product" });
        }
        if self.product.initial_stock < 0 {
            return Err(ConfigError::NegativeStock(self.product.initial_stock));
        }
        if self.product.refill_amount < 1 {
            return Err(ConfigError::InvalidRefill(self.product.refill_amount));
        }

        check_moments("add_actions", self.add_actions.average, self.add_actions.sd)?;
        check_moments(
            "remove_actions",
            self.remove_actions.average,
            self.remove_actions.sd,
        )?;
        check_moments("read_actions", self.read_actions.average, self.read_actions.sd)?;

        let p = self.remove_actions.abort_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability(p));
        }

        Ok(())
    }
}

fn check_moments(section: &'static str, average: f64, sd: f64) -> Result<(), ConfigError> {
    if !average.is_finite() {
        return Err(ConfigError::InvalidAverage { section, average });
    }
    if !sd.is_finite() || sd < 0.0 {
        return Err(ConfigError::InvalidDeviation { section, sd });
    }
    Ok(())
}

/// Errors in a workload configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A population or catalog section asks for no entities.
    #[error("{section}.count must be at least 1")]
    ZeroCount { section: &'static str },

    /// Products would be listed with negative stock.
    #[error("product.initial_stock must not be negative, got {0}")]
    NegativeStock(i64),

    /// A refill would not restock anything.
    #[error("product.refill_amount must be at least 1, got {0}")]
    InvalidRefill(i64),

    /// An action count mean is NaN or infinite.
    #[error("{section}.average must be finite, got {average}")]
    InvalidAverage { section: &'static str, average: f64 },

    /// An action count deviation is negative, NaN or infinite.
    #[error("{section}.sd must be finite and non-negative, got {sd}")]
    InvalidDeviation { section: &'static str, sd: f64 },

    /// The abandonment probability is outside `[0, 1]`.
    #[error("remove_actions.abort_probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// `rand_distr` refused the distribution parameters.
    #[error("Invalid {name} distribution: {reason}")]
    Distribution { name: &'static str, reason: String },

    /// The highest logical id does not fit in `u64` once sharded.
    #[error("{ids} ids do not fit in the id space of shard {shard}")]
    ShardOverflow { shard: ShardSpec, ids: u64 },
}
