//! Workload runner.
//!
//! Drives one generation run end to end: entities, catalog bootstrap,
//! session scheduling and interleaving, all from a single RNG seeded with
//! the shard's effective seed.

use crate::config::{ConfigError, WorkloadConfig};
use crate::entities::EntityIndex;
use crate::interleave::{Interleaver, LiveSessions};
use crate::log::RequestLog;
use crate::session::{SessionGenerator, SessionShape};
use crate::stock::StockLedger;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shoptrace_types::{Action, ShardSpec, UserId};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything produced before interleaving starts.
#[derive(Clone, Debug)]
pub struct WorkloadPlan {
    /// Users and products of the run.
    pub entities: EntityIndex,

    /// Catalog bootstrap: one CREATE_PRODUCT per product.
    pub log: RequestLog,

    /// Stock levels after the bootstrap.
    pub ledger: StockLedger,

    /// Per-user queues waiting to be interleaved.
    pub sessions: LiveSessions,

    /// Number of sessions generated.
    pub sessions_scheduled: u64,
}

/// Result of a complete run.
#[derive(Clone, Debug)]
pub struct GeneratedWorkload {
    /// Effective seed (base seed plus shard offset).
    pub seed: u64,

    /// Shard the run was generated for.
    pub shard: ShardSpec,

    /// Final request log.
    pub log: RequestLog,

    /// Stock levels after the last step.
    pub ledger: StockLedger,

    /// Number of sessions generated.
    pub sessions_scheduled: u64,
}

/// Generates a workload for one shard.
pub struct WorkloadRunner {
    config: WorkloadConfig,
    shard: ShardSpec,
    shape: SessionShape,
    seed: u64,
    rng: ChaCha8Rng,
}

impl WorkloadRunner {
    /// Validate the configuration and seed the run.
    pub fn new(config: WorkloadConfig, shard: ShardSpec) -> Result<Self, ConfigError> {
        config.validate()?;

        // Ids are dense from zero, so checking the highest one covers them all.
        let ids = config.user.count.max(config.product.count);
        if shard.checked_to_shard(ids - 1).is_none() {
            return Err(ConfigError::ShardOverflow { shard, ids });
        }

        let shape = SessionShape::from_config(&config)?;
        let seed = shard.seed_for(config.seed);

        Ok(Self {
            config,
            shard,
            shape,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Effective seed of this run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn shard(&self) -> ShardSpec {
        self.shard
    }

    /// Run every phase and return the final log.
    pub fn run(mut self) -> GeneratedWorkload {
        let plan = self.plan();
        self.interleave(plan)
    }

    /// Create entities, bootstrap the catalog and schedule all sessions.
    pub fn plan(&mut self) -> WorkloadPlan {
        info!(
            seed = self.seed,
            shard = %self.shard,
            users = self.config.user.count,
            products = self.config.product.count,
            sessions = self.config.session.count,
            "Planning workload"
        );

        let entities = EntityIndex::generate(
            self.config.user.count,
            self.config.product.count,
            &mut self.rng,
        );
        let (log, ledger) = self.bootstrap_catalog(&entities);
        let sessions = self.schedule_sessions(&entities);

        WorkloadPlan {
            entities,
            log,
            ledger,
            sessions,
            sessions_scheduled: self.config.session.count,
        }
    }

    /// Interleave a plan's sessions into its log.
    pub fn interleave(&mut self, plan: WorkloadPlan) -> GeneratedWorkload {
        let WorkloadPlan {
            entities,
            mut log,
            ledger,
            sessions,
            sessions_scheduled,
        } = plan;

        let pending = sessions.pending_actions();
        let bootstrap = log.len();
        info!(
            users = sessions.len(),
            pending_actions = pending,
            "Interleaving sessions"
        );

        let interleaver = Interleaver::new(
            sessions,
            ledger,
            &entities,
            self.shard,
            self.config.product.refill_amount,
        );
        let ledger = interleaver.run(&mut log, &mut self.rng);

        info!(
            actions = log.len(),
            refills = log.len() - bootstrap - pending,
            "Workload generated"
        );

        GeneratedWorkload {
            seed: self.seed,
            shard: self.shard,
            log,
            ledger,
            sessions_scheduled,
        }
    }

    fn bootstrap_catalog(&self, entities: &EntityIndex) -> (RequestLog, StockLedger) {
        let initial_stock = self.config.product.initial_stock;
        let mut log = RequestLog::new();
        let mut ledger = StockLedger::new();

        for product in entities.products() {
            log.push(Action::create_product(
                self.shard,
                Arc::clone(product),
                initial_stock,
            ));
            ledger.seed(product.id, initial_stock);
        }

        (log, ledger)
    }

    fn schedule_sessions(&mut self, entities: &EntityIndex) -> LiveSessions {
        let generator = SessionGenerator::new(&self.shape, entities, self.shard);
        let mut live = LiveSessions::new();

        for _ in 0..self.config.session.count {
            let user_id = UserId(self.rng.gen_range(0..self.config.user.count));
            let Some(user) = entities.user(user_id) else {
                continue;
            };

            let session = generator.generate(user, &mut self.rng);
            debug!(user = %user_id, actions = session.len(), "Scheduled session");
            live.schedule(user_id, session);
        }

        live.sort_by_user();
        live
    }
}
