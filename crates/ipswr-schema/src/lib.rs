//! Shared types for ipswr: AppleDB release records, version normalization,
//! and the resolved candidate output.
//!
//! This crate is pure data and value logic. It performs no I/O, so both the
//! resolution core and the CLI can depend on it without pulling in a runtime.

pub mod candidate;
pub mod record;
pub mod version;

// Re-exports
pub use candidate::{Candidate, VersionComponents, precedence};
pub use record::{Link, OsFile, Source, SourceHashes};
pub use version::{VersionError, normalize};

/// Source type tag that designates a firmware image in AppleDB records.
///
/// Sources carrying any other tag (`ota`, `installassistant`, ...) are
/// ignored by the resolver.
pub const IPSW_SOURCE_TYPE: &str = "ipsw";
