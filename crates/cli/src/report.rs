//! Human-readable workload summary.

use shoptrace_generator::ActionStats;
use shoptrace_types::ShardSpec;
use std::fmt;

const RULE: &str = "===========================================";

/// Summary of a generated workload, printed to stderr after emission.
pub struct WorkloadReport<'a> {
    name: &'a str,
    seed: u64,
    shard: ShardSpec,
    stats: &'a ActionStats,
}

impl<'a> WorkloadReport<'a> {
    pub fn new(name: &'a str, seed: u64, shard: ShardSpec, stats: &'a ActionStats) -> Self {
        Self {
            name,
            seed,
            shard,
            stats,
        }
    }
}

impl fmt::Display for WorkloadReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Workload")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Workload:\t{}", self.name)?;
        writeln!(f, "Seed:\t{}", self.seed)?;
        writeln!(f, "Shard:\t{}", self.shard)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Action Stats")?;
        writeln!(f, "{}", RULE)?;
        for (kind, count) in self.stats.iter() {
            writeln!(f, "{}\t{}", kind, count)?;
        }
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "READs:\t{} ({:.3})%",
            self.stats.reads(),
            self.stats.read_percent()
        )?;
        writeln!(
            f,
            "WRITEs:\t{} ({:.3})%",
            self.stats.writes(),
            self.stats.write_percent()
        )?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "TOTAL:\t{}", self.stats.total())?;
        writeln!(f, "{}", RULE)
    }
}
