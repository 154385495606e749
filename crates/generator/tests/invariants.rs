//! Whole-run properties of generated workloads.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shoptrace_generator::{
    ActionStats, Interleaver, RequestLog, WorkloadConfig, WorkloadRunner, MIN_STOCK,
};
use shoptrace_types::{Action, ActionKind, ShardSpec, UserId};
use std::collections::{BTreeMap, HashSet};

/// A scaled-down mixed workload that still exercises refills.
fn small_config() -> WorkloadConfig {
    WorkloadConfig::default()
        .with_users(40)
        .with_products(25)
        .with_sessions(60)
        .with_stock(5, 20)
}

#[test]
fn test_same_seed_same_log() {
    let shard = ShardSpec::new(3, 1).unwrap();
    let a = WorkloadRunner::new(small_config(), shard).unwrap().run();
    let b = WorkloadRunner::new(small_config(), shard).unwrap().run();

    assert_eq!(a.seed, b.seed);
    assert_eq!(a.log, b.log);
    assert_eq!(a.ledger, b.ledger);
}

#[test]
fn test_different_shards_differ() {
    let a = WorkloadRunner::new(small_config(), ShardSpec::new(2, 0).unwrap())
        .unwrap()
        .run();
    let b = WorkloadRunner::new(small_config(), ShardSpec::new(2, 1).unwrap())
        .unwrap()
        .run();

    assert_ne!(a.seed, b.seed);
    let paths_a: HashSet<&str> = a.log.iter().map(Action::path).collect();
    let paths_b: HashSet<&str> = b.log.iter().map(Action::path).collect();
    assert!(paths_a.is_disjoint(&paths_b));
}

#[test]
fn test_every_user_created_exactly_once() {
    let workload = WorkloadRunner::new(small_config(), ShardSpec::SINGLE)
        .unwrap()
        .run();

    let mut creates: BTreeMap<UserId, usize> = BTreeMap::new();
    let mut seen: HashSet<UserId> = HashSet::new();
    for action in &workload.log {
        if let Some(user) = action.user_id() {
            if action.kind() == ActionKind::CreateUser {
                *creates.entry(user).or_default() += 1;
                assert!(
                    !seen.contains(&user),
                    "{} acted before creating an account",
                    user
                );
            }
            seen.insert(user);
        }
    }

    assert!(!seen.is_empty());
    for user in &seen {
        assert_eq!(creates.get(user), Some(&1), "{}", user);
    }
}

#[test]
fn test_catalog_precedes_traffic() {
    let config = small_config();
    let products = config.product.count as usize;
    let workload = WorkloadRunner::new(config, ShardSpec::SINGLE)
        .unwrap()
        .run();

    let kinds = workload.log.kinds();
    assert!(kinds[..products]
        .iter()
        .all(|k| *k == ActionKind::CreateProduct));
    assert!(kinds[products..]
        .iter()
        .all(|k| *k != ActionKind::CreateProduct));
}

#[test]
fn test_interleaving_preserves_scheduled_order() {
    let mut runner = WorkloadRunner::new(small_config(), ShardSpec::SINGLE).unwrap();
    let plan = runner.plan();

    let expected: BTreeMap<UserId, Vec<Action>> = plan
        .sessions
        .users()
        .map(|user| {
            let queue = plan.sessions.queue(user).unwrap();
            (user, queue.iter().cloned().collect())
        })
        .collect();

    let workload = runner.interleave(plan);

    for (user, scheduled) in &expected {
        let emitted: Vec<Action> = workload.log.for_user(*user).cloned().collect();
        assert_eq!(&emitted, scheduled, "order differs for {}", user);
    }
}

#[test]
fn test_stock_restored_after_every_step() {
    let config = small_config().with_stock(1, 3);
    let refill_amount = config.product.refill_amount;
    let mut runner = WorkloadRunner::new(config, ShardSpec::SINGLE).unwrap();
    let plan = runner.plan();

    let pending = plan.sessions.pending_actions();
    let mut log: RequestLog = plan.log.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut interleaver = Interleaver::new(
        plan.sessions,
        plan.ledger,
        &plan.entities,
        ShardSpec::SINGLE,
        refill_amount,
    );

    let mut steps = 0;
    let mut refills = 0;
    while let Some(outcome) = interleaver.step(&mut log, &mut rng) {
        steps += 1;
        refills += outcome.refills;
        assert!(interleaver.ledger().min_level().unwrap() >= MIN_STOCK);
        assert_eq!(interleaver.live().pending_actions(), pending - steps);
    }

    assert_eq!(steps, pending);
    assert!(interleaver.live().is_empty());
    assert!(refills > 0, "tight stock should force refills");

    let stats = ActionStats::from_log(&log);
    assert_eq!(stats.count(ActionKind::RefillProduct), refills as u64);
}

#[test]
fn test_empty_shelves_restocked_by_first_step() {
    let config = small_config().with_stock(0, 1);
    let mut runner = WorkloadRunner::new(config, ShardSpec::SINGLE).unwrap();
    let plan = runner.plan();
    assert_eq!(plan.ledger.min_level(), Some(0));

    let mut log = plan.log.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut interleaver = Interleaver::new(
        plan.sessions,
        plan.ledger,
        &plan.entities,
        ShardSpec::SINGLE,
        1,
    );

    // Every queue opens with CREATE_USER, so the first scan precedes any cart action.
    let first = interleaver.step(&mut log, &mut rng).unwrap();
    assert_eq!(first.kind, ActionKind::CreateUser);
    assert_eq!(first.refills, 25);
    assert_eq!(interleaver.ledger().min_level(), Some(MIN_STOCK));
    while interleaver.step(&mut log, &mut rng).is_some() {
        assert!(interleaver.ledger().min_level().unwrap() >= MIN_STOCK);
    }
}

#[test]
fn test_refills_follow_the_depleting_action() {
    let workload = WorkloadRunner::new(small_config().with_stock(1, 2), ShardSpec::SINGLE)
        .unwrap()
        .run();

    // Replaying the log, a product may only dip below the minimum on the
    // action immediately followed by its refill.
    let mut levels: BTreeMap<u64, i64> = BTreeMap::new();
    let actions = workload.log.as_slice();
    for (i, action) in actions.iter().enumerate() {
        let Some(product) = action.product_id() else {
            continue;
        };
        let level = levels.entry(product.0).or_insert(0);
        match action.kind() {
            ActionKind::CreateProduct | ActionKind::RefillProduct => {
                *level += action.amount().unwrap();
            }
            _ => {
                if let Some((_, delta)) = action.stock_delta() {
                    *level += delta;
                }
            }
        }
        if *level < MIN_STOCK && i >= 25 && action.kind() != ActionKind::CreateProduct {
            let refilled = actions[i + 1..]
                .iter()
                .take_while(|a| a.kind() == ActionKind::RefillProduct)
                .any(|a| a.product_id() == Some(product));
            assert!(refilled, "{} left depleted at {}", product, i);
        }
    }
}

#[test]
fn test_stats_cover_whole_log() {
    let workload = WorkloadRunner::new(small_config(), ShardSpec::SINGLE)
        .unwrap()
        .run();
    let stats = ActionStats::from_log(&workload.log);

    assert_eq!(stats.total() as usize, workload.log.len());
    assert_eq!(stats.count(ActionKind::CreateProduct), 25);
    assert!(stats.reads() > 0 && stats.writes() > 0);
    assert!((stats.read_percent() + stats.write_percent() - 100.0).abs() < 1e-9);
}
