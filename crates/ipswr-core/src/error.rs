//! Error types for resolution and dataset acquisition.
//!
//! Per-record problems (an undecodable record, an unparsable version
//! label) are not represented here: they are swallowed with a diagnostic
//! and the batch continues. These enums cover the call-level failures
//! that surface as the sole result of an operation.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Call-level failures of [`crate::resolve`] and [`crate::Query`]
/// construction.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The caller-supplied version constraint expression did not parse.
    /// Fatal before any record is read: nothing can be filtered without
    /// a valid constraint.
    #[error("invalid version constraint '{constraint}': {source}")]
    InvalidConstraint {
        /// The constraint expression as supplied.
        constraint: String,
        /// The underlying semver parse failure.
        source: semver::Error,
    },

    /// No record survived filtering. Distinct from a parse error: the
    /// input was well-formed, it just contained no matching IPSW.
    #[error("no IPSWs matched the given filters")]
    NoMatch,
}

/// Failures acquiring or reading the local AppleDB dataset.
#[derive(Debug, Error)]
pub enum AppleDbError {
    /// The sync was interrupted by a shutdown signal. Distinct from an
    /// I/O failure so callers can exit quietly.
    #[error("AppleDB sync cancelled")]
    Cancelled,

    /// No local dataset exists at the expected location. In offline mode
    /// this means a prior online sync is required.
    #[error("no AppleDB dataset at {0}")]
    MissingDataset(PathBuf),

    /// A git subprocess exited unsuccessfully.
    #[error("git {op} failed: {status}")]
    Git {
        /// Which operation ran, `clone` or `pull`.
        op: &'static str,
        /// The child's exit status.
        status: ExitStatus,
    },

    /// An underlying I/O failure (spawning git, reading a record file).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A failure walking the dataset directory tree.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}
