//! Shoptrace command-line support.
//!
//! Loads workload files, emits generated request logs as runnable `curl`
//! commands and renders the summary report.

pub mod emit;
pub mod report;
pub mod workload_file;

pub use emit::{curl_command, emit_all, CurlEmitter, EmitError, RequestEmitter, DEFAULT_BASE_PATH};
pub use report::WorkloadReport;
pub use workload_file::{
    load_workload, parse_workload, resolve_workload, workload_name, WorkloadFileError,
};
