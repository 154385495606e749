//! The workload files shipped in `workloads/` load and generate.

use shoptrace_cli::{emit_all, load_workload, resolve_workload, CurlEmitter};
use shoptrace_generator::WorkloadRunner;
use shoptrace_types::{ActionKind, ShardSpec};
use std::path::PathBuf;

fn workload_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../workloads")
}

#[test]
fn test_shipped_workloads_parse() {
    for name in ["50r50w_10K", "90r10w_100K"] {
        let path = resolve_workload(name, &workload_dir());
        let config = load_workload(&path).unwrap_or_else(|e| panic!("{}: {}", name, e));
        assert_eq!(config.user.count, 1000);
        assert_eq!(config.product.count, 200);
    }
}

#[test]
fn test_mixed_workload_end_to_end() {
    let path = resolve_workload("50r50w_10K", &workload_dir());
    let config = load_workload(&path).unwrap();
    let shard = ShardSpec::new(2, 1).unwrap();

    let workload = WorkloadRunner::new(config, shard).unwrap().run();
    assert_eq!(workload.seed, 12346);

    let mut emitter = CurlEmitter::new(Vec::new());
    let stats = emit_all(&mut emitter, &workload.log).unwrap();
    let script = String::from_utf8(emitter.into_inner()).unwrap();

    assert_eq!(script.lines().count(), workload.log.len());
    assert!(script.lines().all(|line| line.starts_with("curl --silent")));
    assert_eq!(stats.count(ActionKind::CreateProduct), 200);

    // Sessions average ~11 adds, ~3 removes and ~12 views: a mixed workload.
    let reads = stats.read_percent();
    assert!(reads > 30.0 && reads < 70.0, "read share {:.1}%", reads);
}
