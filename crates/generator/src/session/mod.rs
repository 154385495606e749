//! Shopping session generation.
//!
//! A session is one user's visit: cart additions, cart removals, product
//! views sprinkled in between, a last look at the cart, and either a
//! checkout or an abandoned cart that gets emptied.

mod cart;

use crate::config::WorkloadConfig;
use crate::distributions::{ActionCount, ProductPopularity};
use crate::entities::EntityIndex;
use cart::CartTracker;
use rand::Rng;
use shoptrace_types::{Action, ShardSpec, User};
use std::collections::VecDeque;
use std::sync::Arc;

/// Ordered actions of one user, drained front to back by the interleaver.
pub type Session = VecDeque<Action>;

/// Distributions and flags shaping every session of a run.
#[derive(Clone, Debug)]
pub struct SessionShape {
    add: ActionCount,
    remove: ActionCount,
    read: ActionCount,
    view_before_add: bool,
    abort_probability: f64,
    popularity: ProductPopularity,
}

impl SessionShape {
    /// Build the distributions described by a (validated) configuration.
    pub fn from_config(config: &WorkloadConfig) -> Result<Self, crate::ConfigError> {
        Ok(Self {
            add: ActionCount::new(
                "add_actions",
                config.add_actions.average,
                config.add_actions.sd,
            )?,
            remove: ActionCount::new(
                "remove_actions",
                config.remove_actions.average,
                config.remove_actions.sd,
            )?,
            read: ActionCount::new(
                "read_actions",
                config.read_actions.average,
                config.read_actions.sd,
            )?,
            view_before_add: config.add_actions.view_before,
            abort_probability: config.remove_actions.abort_probability,
            popularity: ProductPopularity::new(config.product.count)?,
        })
    }
}

/// Generates sessions against a fixed catalog.
pub struct SessionGenerator<'a> {
    shape: &'a SessionShape,
    entities: &'a EntityIndex,
    shard: ShardSpec,
}

impl<'a> SessionGenerator<'a> {
    pub fn new(shape: &'a SessionShape, entities: &'a EntityIndex, shard: ShardSpec) -> Self {
        Self {
            shape,
            entities,
            shard,
        }
    }

    /// Generate one complete session for `user`.
    ///
    /// The session always opens with CREATE_USER; dropping it for users that
    /// already have an account is up to the scheduler.
    pub fn generate(&self, user: &Arc<User>, rng: &mut impl Rng) -> Session {
        let mut log = Vec::new();
        let mut cart = CartTracker::default();

        self.add_phase(user, &mut cart, &mut log, rng);
        self.remove_phase(user, &mut cart, &mut log, rng);
        self.read_phase(&mut log, rng);

        let mut session = Session::with_capacity(log.len() + cart.len() + 3);
        session.push_back(Action::create_user(self.shard, Arc::clone(user)));
        session.extend(log);
        session.push_back(Action::show_cart(self.shard, Arc::clone(user)));

        let checkout = rng.gen::<f64>() > self.shape.abort_probability && !cart.is_empty();
        if checkout {
            session.push_back(Action::checkout_cart(self.shard, Arc::clone(user)));
        } else {
            for (product, quantity) in cart.drain() {
                if let Some(product) = self.entities.product(product) {
                    session.push_back(Action::remove_product_from_cart(
                        self.shard,
                        Arc::clone(user),
                        Arc::clone(product),
                        -quantity,
                    ));
                }
            }
        }

        session
    }

    fn add_phase(
        &self,
        user: &Arc<User>,
        cart: &mut CartTracker,
        log: &mut Vec<Action>,
        rng: &mut impl Rng,
    ) {
        let count = self.shape.add.sample(rng);
        for _ in 0..count {
            let id = self.shape.popularity.sample(rng);
            let Some(product) = self.entities.product(id) else {
                continue;
            };

            if self.shape.view_before_add {
                log.push(Action::show_product(self.shard, Arc::clone(product)));
            }

            if cart.contains(id) {
                log.push(Action::change_product_in_cart(
                    self.shard,
                    Arc::clone(user),
                    Arc::clone(product),
                    1,
                ));
            } else {
                log.push(Action::add_product_to_cart(
                    self.shard,
                    Arc::clone(user),
                    Arc::clone(product),
                ));
            }
            cart.add(id, 1);
        }
    }

    fn remove_phase(
        &self,
        user: &Arc<User>,
        cart: &mut CartTracker,
        log: &mut Vec<Action>,
        rng: &mut impl Rng,
    ) {
        let count = self.shape.remove.sample(rng);
        for _ in 0..count {
            if cart.is_empty() {
                break;
            }

            let Some(id) = cart.pick(rng) else {
                break;
            };
            let Some(product) = self.entities.product(id) else {
                continue;
            };

            log.push(Action::get_product_in_cart(
                self.shard,
                Arc::clone(user),
                Arc::clone(product),
            ));

            if cart.quantity(id) > 1 {
                log.push(Action::change_product_in_cart(
                    self.shard,
                    Arc::clone(user),
                    Arc::clone(product),
                    -1,
                ));
            } else {
                log.push(Action::remove_product_from_cart(
                    self.shard,
                    Arc::clone(user),
                    Arc::clone(product),
                    -1,
                ));
            }
            cart.add(id, -1);
        }
    }

    /// Splice product views into the log built so far.
    ///
    /// Positions are drawn from `0..len`, so a view never lands after the
    /// last cart operation; an empty log takes the view at position 0.
    fn read_phase(&self, log: &mut Vec<Action>, rng: &mut impl Rng) {
        let count = self.shape.read.sample(rng);
        for _ in 0..count {
            let id = self.shape.popularity.sample(rng);
            let position = if log.is_empty() {
                0
            } else {
                rng.gen_range(0..log.len())
            };

            if let Some(product) = self.entities.product(id) {
                log.insert(position, Action::show_product(self.shard, Arc::clone(product)));
            }
        }
    }
}
