//! AppleDB wire format.
//!
//! One [`OsFile`] corresponds to one JSON file under AppleDB's `osFiles/`
//! tree and describes a single OS release: identity, release date, beta
//! flag, and the download sources for every supported device.
//!
//! The upstream schema carries far more fields than the resolver needs;
//! everything unknown is ignored on decode, and fields that older records
//! omit fall back to their defaults so a sparse record still decodes.

use serde::{Deserialize, Serialize};

/// One OS release record as stored in AppleDB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsFile {
    /// OS name, e.g. `iOS`, `macOS`, `audioOS`.
    #[serde(rename = "osStr")]
    pub os: String,

    /// Human version label. Inconsistently formatted: may contain spaces
    /// and extra words, e.g. `"13 Beta 2"` or `"12.2"`.
    pub version: String,

    /// Build identifier, e.g. `19C57`.
    #[serde(default)]
    pub build: String,

    /// Release date as `YYYY-MM-DD`. May be empty or unparseable.
    #[serde(default)]
    pub released: String,

    /// Whether this release is a beta.
    #[serde(default)]
    pub beta: bool,

    /// Download sources, one per artifact kind and device group.
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// One download source inside an [`OsFile`]: a single artifact offered for
/// a set of devices, via one or more mirror links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Artifact kind tag. Firmware images carry [`crate::IPSW_SOURCE_TYPE`].
    #[serde(rename = "type")]
    pub type_: String,

    /// Device identifiers this source applies to, e.g. `iPhone11,2`.
    #[serde(rename = "deviceMap", default)]
    pub device_map: Vec<String>,

    /// Mirror links for the artifact, in upstream listing order.
    #[serde(default)]
    pub links: Vec<Link>,

    /// Content hashes of the artifact, where upstream recorded them.
    #[serde(default)]
    pub hashes: SourceHashes,

    /// Artifact size in bytes.
    #[serde(default)]
    pub size: u64,
}

/// One mirror link of a [`Source`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Download URL.
    pub url: String,

    /// Upstream marks one link per source as the preferred mirror.
    #[serde(default)]
    pub preferred: bool,

    /// Inactive links are dead mirrors and must never be selected.
    #[serde(default)]
    pub active: bool,
}

/// Content hashes recorded for a [`Source`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceHashes {
    /// SHA-256 digest, hex encoded.
    #[serde(rename = "sha2-256", default, skip_serializing_if = "Option::is_none")]
    pub sha2_256: Option<String>,

    /// SHA-1 digest, hex encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
}
