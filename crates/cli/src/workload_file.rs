//! Workload file loading.
//!
//! Workloads are TOML files, one per scenario, usually kept in a
//! `workloads/` directory and referred to by file stem.

use shoptrace_generator::{ConfigError, WorkloadConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of workload files.
pub const WORKLOAD_EXTENSION: &str = "toml";

/// Resolve a workload argument.
///
/// An existing file path is used as is; anything else is treated as a
/// workload name inside `dir`, with the extension appended so dotted names
/// such as `mix.v2` keep their suffix.
pub fn resolve_workload(workload: &str, dir: &Path) -> PathBuf {
    let direct = PathBuf::from(workload);
    if direct.is_file() {
        return direct;
    }
    dir.join(format!("{}.{}", workload, WORKLOAD_EXTENSION))
}

/// Display name of a workload: its file stem.
pub fn workload_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read, parse and validate a workload file.
pub fn load_workload(path: &Path) -> Result<WorkloadConfig, WorkloadFileError> {
    let contents = fs::read_to_string(path).map_err(|source| WorkloadFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_workload(&contents).map_err(|err| err.with_path(path))
}

/// Parse and validate workload TOML.
pub fn parse_workload(contents: &str) -> Result<WorkloadConfig, WorkloadFileError> {
    let config: WorkloadConfig = toml::from_str(contents).map_err(|source| {
        WorkloadFileError::Parse {
            path: None,
            source,
        }
    })?;
    config.validate()?;
    Ok(config)
}

/// Errors loading a workload file.
#[derive(Debug, thiserror::Error)]
pub enum WorkloadFileError {
    /// The file could not be read.
    #[error("Failed to read workload {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed workload.
    #[error("Failed to parse workload{}: {source}", describe_path(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },

    /// The workload parsed but failed validation.
    #[error("Invalid workload: {0}")]
    Invalid(#[from] ConfigError),
}

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

impl WorkloadFileError {
    fn with_path(self, path: &Path) -> Self {
        match self {
            WorkloadFileError::Parse { source, .. } => WorkloadFileError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}
