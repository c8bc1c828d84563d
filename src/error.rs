//! Failure taxonomy for a profiling run.
//!
//! Stage-local failures are typed so the orchestrator can decide how far to
//! degrade: a parse failure aborts the run, a failed numerical aggregate
//! empties that stage only, and a failed categorical column is replaced with
//! an error marker while the remaining columns proceed.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse input as delimited text: {0}")]
    Parse(String),
    #[error("numerical aggregate failed: {0}")]
    Aggregate(String),
    #[error("statistics for column '{column}' failed: {reason}")]
    Column { column: String, reason: String },
}
