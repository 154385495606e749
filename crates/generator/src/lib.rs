//! Shoptrace Generator
//!
//! Deterministic synthesis of e-commerce request traces for load testing.
//!
//! # Architecture
//!
//! ```text
//! WorkloadConfig ──► EntityIndex ──► catalog bootstrap (CREATE_PRODUCT …)
//!                        │
//!                        ▼
//!               SessionGenerator (one run per scheduled session)
//!                        │
//!                        ▼
//!               LiveSessions (one queue per user)
//!                        │
//!                        ▼
//!               Interleaver ──► RequestLog
//!                   │
//!                   └── StockLedger (refills injected when depleted)
//! ```
//!
//! Everything is driven by one `ChaCha8Rng` seeded with `seed + shard offset`,
//! so a shard's log is a pure function of its configuration.
//!
//! # Example
//!
//! ```ignore
//! use shoptrace_generator::{ActionStats, WorkloadConfig, WorkloadRunner};
//! use shoptrace_types::ShardSpec;
//!
//! let config = WorkloadConfig::default().with_sessions(50);
//! let workload = WorkloadRunner::new(config, ShardSpec::SINGLE)?.run();
//!
//! let stats = ActionStats::from_log(&workload.log);
//! println!("reads: {:.1}%", stats.read_percent());
//! ```

pub mod config;
pub mod distributions;
pub mod entities;
pub mod interleave;
pub mod log;
pub mod runner;
pub mod session;
pub mod stats;
pub mod stock;

pub use config::{ConfigError, WorkloadConfig};
pub use entities::EntityIndex;
pub use interleave::{Interleaver, LiveSessions, StepOutcome};
pub use log::RequestLog;
pub use runner::{GeneratedWorkload, WorkloadPlan, WorkloadRunner};
pub use session::{Session, SessionGenerator, SessionShape};
pub use stats::ActionStats;
pub use stock::{StockLedger, MIN_STOCK};
