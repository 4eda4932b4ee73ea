//! Resolved candidate output and its ranking order.

use std::cmp::Ordering;

use chrono::NaiveDate;
use semver::Version;
use serde::Serialize;

use crate::record::OsFile;

/// A fully filtered, URL-resolved release eligible for ranking.
///
/// A `Candidate` is a projection of exactly one [`OsFile`] plus the one
/// link URL selected for it and its normalized version. It is immutable
/// once constructed; the resolver collects the whole set and reduces it
/// to one with [`precedence`].
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    /// OS name, verbatim from the record.
    pub os: String,

    /// Canonical version string, rendered from the normalized version so
    /// it reflects injected prerelease/metadata (e.g. `16.0.0-beta+20A5283p`).
    pub version: String,

    /// Build identifier, verbatim from the record.
    pub build: String,

    /// Release date string, verbatim from the record.
    pub released: String,

    /// Beta flag, verbatim from the record.
    pub beta: bool,

    /// The selected firmware download URL.
    pub url: String,

    /// Decomposed version for structured consumers.
    #[serde(rename = "version_components")]
    components: VersionComponents,

    #[serde(skip)]
    normalized: Version,

    #[serde(skip)]
    released_date: Option<NaiveDate>,
}

/// The decomposed parts of a candidate's normalized version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionComponents {
    /// Major version number.
    pub major: u64,
    /// Minor version number.
    pub minor: u64,
    /// Patch version number.
    pub patch: u64,
    /// Prerelease identifiers, empty for final releases.
    pub prerelease: String,
    /// Build metadata, typically the Apple build identifier.
    pub metadata: String,
}

impl VersionComponents {
    /// Decompose a normalized version.
    pub fn of(version: &Version) -> Self {
        Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            prerelease: version.pre.as_str().to_string(),
            metadata: version.build.as_str().to_string(),
        }
    }
}

impl Candidate {
    /// Project a record into a candidate, given the URL selected for it
    /// and its normalized version.
    pub fn new(record: &OsFile, url: impl Into<String>, normalized: Version) -> Self {
        let released_date = NaiveDate::parse_from_str(&record.released, "%Y-%m-%d").ok();
        Self {
            os: record.os.clone(),
            version: normalized.to_string(),
            build: record.build.clone(),
            released: record.released.clone(),
            beta: record.beta,
            url: url.into(),
            components: VersionComponents::of(&normalized),
            normalized,
            released_date,
        }
    }

    /// The normalized version this candidate ranks under.
    pub fn normalized(&self) -> &Version {
        &self.normalized
    }

    /// The decomposed version components.
    pub fn components(&self) -> &VersionComponents {
        &self.components
    }

    /// Release date, if the record's date string parsed as `YYYY-MM-DD`.
    pub fn released_date(&self) -> Option<NaiveDate> {
        self.released_date
    }
}

/// Composite ranking order: semver precedence, then release date.
///
/// Build metadata never participates ([`Version::cmp_precedence`]), so
/// two builds of the same version tie on the primary key and the release
/// date decides. Missing or unparseable dates order before every real
/// date, i.e. they rank as the oldest possible release.
pub fn precedence(a: &Candidate, b: &Candidate) -> Ordering {
    a.normalized
        .cmp_precedence(&b.normalized)
        .then_with(|| a.released_date.cmp(&b.released_date))
}
