//! Version label normalization.
//!
//! AppleDB version labels are written for humans: `"13 Beta 2"`,
//! `"12.2"`, `"16.1.2"`. Constraint matching needs a total order, so
//! labels are folded into [`semver::Version`] values:
//!
//! 1. The first space becomes a `-` (opening a prerelease run) and every
//!    remaining space becomes a `.` (merging extra words into it), so
//!    `"13 Beta 2"` reads `"13-Beta.2"`.
//! 2. A missing minor/patch is padded with zeros; Apple labels routinely
//!    stop after one or two components.
//! 3. A beta record with no explicit prerelease gets the literal `beta`
//!    prerelease, keeping betas below their final release under
//!    constraint matching.
//! 4. A label with no build metadata gets the record's build identifier
//!    as metadata, so the canonical string carries it without affecting
//!    ordering.
//!
//! This is a heuristic, not a general parser: anything that does not
//! reduce to `major[.minor[.patch]]` with optional `-pre`/`+meta` fails
//! with [`VersionError::Unparsable`], and the caller skips the record.

use semver::{BuildMetadata, Prerelease, Version};
use thiserror::Error;

/// Errors from version label normalization.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The label does not reduce to a semantic version.
    #[error("unparsable version label '{label}': {source}")]
    Unparsable {
        /// The raw label as it appeared in the record.
        label: String,
        /// The underlying semver parse failure.
        source: semver::Error,
    },
}

/// Normalize a raw version label into a comparable [`Version`].
///
/// `beta` and `build` come from the same record as the label and fill in
/// prerelease and build metadata when the label itself carries none.
///
/// # Errors
///
/// Returns [`VersionError::Unparsable`] when the transformed label is not
/// a valid semantic version.
pub fn normalize(label: &str, beta: bool, build: &str) -> Result<Version, VersionError> {
    let unparsable = |source| VersionError::Unparsable {
        label: label.to_string(),
        source,
    };

    let separated = label.replacen(' ', "-", 1).replace(' ', ".");
    let mut version = parse_lenient(&separated).map_err(unparsable)?;

    if beta && version.pre.is_empty() {
        version.pre = Prerelease::new("beta").map_err(unparsable)?;
    }

    if version.build.is_empty() && !build.is_empty() {
        // Build identifiers are almost always valid metadata (`19C57`);
        // the rare one that is not is simply left off, like upstream.
        if let Ok(metadata) = BuildMetadata::new(build) {
            version.build = metadata;
        }
    }

    Ok(version)
}

/// Parse a semantic version, padding a partial `major[.minor[.patch]]`
/// numeric core with zeros.
fn parse_lenient(s: &str) -> Result<Version, semver::Error> {
    let core_end = s.find(['-', '+']).unwrap_or(s.len());
    let (core, suffix) = s.split_at(core_end);

    let mut padded = core.to_string();
    for _ in core.matches('.').count()..2 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);

    Version::parse(&padded)
}
