//! Merging per-user sessions into one request log.
//!
//! Each step picks a live session with a Zipf draw over the current session
//! order, moves its head action to the log, books the stock change and then
//! restocks every depleted product. Sessions near the front of the order are
//! strongly favoured, which gives bursty per-user activity while every
//! session still drains eventually.

use crate::distributions::zipf_index;
use crate::entities::EntityIndex;
use crate::log::RequestLog;
use crate::session::Session;
use crate::stock::StockLedger;
use indexmap::IndexMap;
use rand::Rng;
use shoptrace_types::{Action, ActionKind, ShardSpec, UserId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::trace;

/// Pending sessions, one queue per user, in selection order.
#[derive(Clone, Debug, Default)]
pub struct LiveSessions {
    queues: IndexMap<UserId, Session>,
    /// Users whose account-creating session has been scheduled.
    registered: BTreeSet<UserId>,
}

impl LiveSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a freshly generated session behind anything already pending for
    /// its user.
    ///
    /// Only a user's first session keeps its leading CREATE_USER; later ones
    /// have it stripped so every account is created exactly once.
    pub fn schedule(&mut self, user: UserId, mut session: Session) {
        let known = !self.registered.insert(user);
        if known && matches!(session.front(), Some(a) if a.kind() == ActionKind::CreateUser) {
            session.pop_front();
        }
        if session.is_empty() {
            return;
        }
        self.queues.entry(user).or_default().extend(session);
    }

    /// Order queues by user id.
    pub fn sort_by_user(&mut self) {
        self.queues.sort_keys();
    }

    /// Number of non-empty queues.
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Total actions still waiting across all queues.
    pub fn pending_actions(&self) -> usize {
        self.queues.values().map(|q| q.len()).sum()
    }

    /// The pending queue of `user`.
    pub fn queue(&self, user: UserId) -> Option<&Session> {
        self.queues.get(&user)
    }

    /// Users with pending actions, in selection order.
    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.queues.keys().copied()
    }

    /// Pop the head of the queue at `index`, dropping the queue once empty.
    fn pop_at(&mut self, index: usize) -> Option<(UserId, Action, bool)> {
        let (&user, queue) = self.queues.get_index_mut(index)?;
        let action = queue.pop_front()?;
        let finished = queue.is_empty();
        if finished {
            self.queues.shift_remove_index(index);
        }
        Some((user, action, finished))
    }
}

/// What a single interleaving step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Owner of the session that was advanced.
    pub user: UserId,

    /// Kind of the action moved to the log.
    pub kind: ActionKind,

    /// Whether the session ran out of actions.
    pub session_finished: bool,

    /// Number of refill actions injected after the move.
    pub refills: usize,
}

/// Drains [`LiveSessions`] into a [`RequestLog`] while keeping stock booked.
pub struct Interleaver<'a> {
    live: LiveSessions,
    ledger: StockLedger,
    entities: &'a EntityIndex,
    shard: ShardSpec,
    refill_amount: i64,
}

impl<'a> Interleaver<'a> {
    pub fn new(
        live: LiveSessions,
        ledger: StockLedger,
        entities: &'a EntityIndex,
        shard: ShardSpec,
        refill_amount: i64,
    ) -> Self {
        Self {
            live,
            ledger,
            entities,
            shard,
            refill_amount,
        }
    }

    pub fn live(&self) -> &LiveSessions {
        &self.live
    }

    pub fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    /// Advance one session by one action. Returns `None` once every
    /// session has drained.
    pub fn step(&mut self, log: &mut RequestLog, rng: &mut impl Rng) -> Option<StepOutcome> {
        let index = zipf_index(self.live.len(), rng)?;
        let (user, action, session_finished) = self.live.pop_at(index)?;
        let kind = action.kind();

        if let Some((product, delta)) = action.stock_delta() {
            self.ledger.apply(product, delta);
        }
        log.push(action);

        let refills = self.refill_depleted(log);

        Some(StepOutcome {
            user,
            kind,
            session_finished,
            refills,
        })
    }

    /// Interleave everything and hand back the final ledger.
    pub fn run(mut self, log: &mut RequestLog, rng: &mut impl Rng) -> StockLedger {
        while self.step(log, rng).is_some() {}
        self.ledger
    }

    /// Restock every product below the minimum level with one refill.
    fn refill_depleted(&mut self, log: &mut RequestLog) -> usize {
        let mut refills = 0;
        for product_id in self.ledger.depleted() {
            let Some(product) = self.entities.product(product_id) else {
                continue;
            };
            trace!(
                product = %product_id,
                level = self.ledger.level(product_id),
                amount = self.refill_amount,
                "Refilling product"
            );
            log.push(Action::refill_product(
                self.shard,
                Arc::clone(product),
                self.refill_amount,
            ));
            self.ledger.apply(product_id, self.refill_amount);
            refills += 1;
        }
        refills
    }
}
