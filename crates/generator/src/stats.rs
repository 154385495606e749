//! Workload mix statistics.

use crate::log::RequestLog;
use shoptrace_types::{Action, ActionKind, RwClass};

/// Per-kind counts and the read/write split of a request log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionStats {
    counts: [u64; ActionKind::ALL.len()],
    reads: u64,
    writes: u64,
}

impl ActionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a whole log.
    pub fn from_log(log: &RequestLog) -> Self {
        let mut stats = Self::new();
        for action in log {
            stats.record(action);
        }
        stats
    }

    pub fn record(&mut self, action: &Action) {
        self.counts[action.kind().index()] += 1;
        match action.rw_class() {
            RwClass::Read => self.reads += 1,
            RwClass::Write => self.writes += 1,
        }
    }

    pub fn count(&self, kind: ActionKind) -> u64 {
        self.counts[kind.index()]
    }

    /// Counts for every kind in catalog order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (ActionKind, u64)> + '_ {
        ActionKind::ALL.iter().map(move |&kind| (kind, self.count(kind)))
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn total(&self) -> u64 {
        self.reads + self.writes
    }

    /// Share of reads in percent; `0.0` for an empty log.
    pub fn read_percent(&self) -> f64 {
        percent(self.reads, self.total())
    }

    /// Share of writes in percent; `0.0` for an empty log.
    pub fn write_percent(&self) -> f64 {
        percent(self.writes, self.total())
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoptrace_types::{Product, ProductId, ShardSpec, User, UserId};
    use std::sync::Arc;

    #[test]
    fn test_counts_and_ratios() {
        let shard = ShardSpec::SINGLE;
        let user = Arc::new(User {
            id: UserId(0),
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
        });
        let product = Arc::new(Product {
            id: ProductId(0),
            name: "Compiler".to_string(),
            price: 99.0,
        });

        let mut log = RequestLog::new();
        log.push(Action::create_product(shard, Arc::clone(&product), 10));
        log.push(Action::create_user(shard, Arc::clone(&user)));
        log.push(Action::show_product(shard, Arc::clone(&product)));
        log.push(Action::show_product(shard, Arc::clone(&product)));
        log.push(Action::show_cart(shard, user));

        let stats = ActionStats::from_log(&log);
        assert_eq!(stats.count(ActionKind::ShowProduct), 2);
        assert_eq!(stats.count(ActionKind::CheckoutCart), 0);
        assert_eq!(stats.reads(), 3);
        assert_eq!(stats.writes(), 2);
        assert_eq!(stats.total(), 5);
        assert!((stats.read_percent() - 60.0).abs() < 1e-9);
        assert!((stats.write_percent() - 40.0).abs() < 1e-9);
        assert_eq!(stats.iter().count(), 10);
        assert_eq!(stats.iter().map(|(_, n)| n).sum::<u64>(), 5);
    }

    #[test]
    fn test_empty_log() {
        let stats = ActionStats::from_log(&RequestLog::new());
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.read_percent(), 0.0);
    }
}
