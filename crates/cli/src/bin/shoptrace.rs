//! Shoptrace CLI
//!
//! Generates a synthetic e-commerce request trace for one shard and writes it
//! to stdout as `curl` commands. Logs and the summary report go to stderr.

use clap::Parser;
use shoptrace_cli::{
    emit_all, load_workload, resolve_workload, workload_name, CurlEmitter, WorkloadReport,
    DEFAULT_BASE_PATH,
};
use shoptrace_generator::WorkloadRunner;
use shoptrace_types::ShardSpec;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shoptrace")]
#[command(about = "Synthetic e-commerce request trace generator")]
#[command(version)]
struct Cli {
    /// Workload name (looked up in --workload-dir) or path to a workload file
    workload: String,

    /// Index of this shard, in 0..SHARD_COUNT
    #[arg(default_value_t = 0)]
    shard_offset: u64,

    /// Total number of shards
    #[arg(default_value_t = 1)]
    shard_count: u64,

    /// Directory holding named workloads
    #[arg(long, default_value = "workloads")]
    workload_dir: PathBuf,

    /// Prefix for every request URL
    #[arg(long, default_value = DEFAULT_BASE_PATH)]
    base_path: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the generated script, so logs must stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let shard = ShardSpec::new(cli.shard_count, cli.shard_offset)?;
    let path = resolve_workload(&cli.workload, &cli.workload_dir);
    let name = workload_name(&path);

    info!(path = %path.display(), "Loading workload");
    let config = load_workload(&path)?;

    let workload = WorkloadRunner::new(config, shard)?.run();

    let stdout = io::stdout();
    let mut emitter = CurlEmitter::new(BufWriter::new(stdout.lock())).with_base_path(cli.base_path);
    let stats = emit_all(&mut emitter, &workload.log)?;

    eprint!(
        "{}",
        WorkloadReport::new(&name, workload.seed, workload.shard, &stats)
    );

    Ok(())
}
