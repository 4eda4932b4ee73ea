//! The validated configuration bundle for one resolution call.

use semver::VersionReq;

use crate::error::ResolveError;

/// What to resolve: an OS name, a version constraint, and optionally a
/// device identifier.
///
/// Constructing a `Query` parses the constraint expression up front, so
/// an invalid constraint fails the call before any record is read.
///
/// # Example
///
/// ```
/// use ipswr_core::Query;
///
/// let query = Query::new("iOS", ">=16.1, <17", Some("iPhone11,2")).unwrap();
/// assert_eq!(query.os, "iOS");
///
/// assert!(Query::new("iOS", "sixteen", None::<String>).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    /// Requested OS name, matched exactly against each record's `osStr`.
    pub os: String,

    /// Parsed version constraint. Standard semver matching applies:
    /// prerelease versions only match when a comparator carries an
    /// explicit prerelease floor (e.g. `>=16.0.0-0`), so betas are
    /// opt-in.
    pub requirement: VersionReq,

    /// Device identifier filter. `None` means every device qualifies.
    pub device: Option<String>,
}

impl Query {
    /// Build a query, parsing `constraint` as a semver range expression.
    ///
    /// An empty `device` is treated the same as no device filter.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidConstraint`] when the constraint
    /// expression does not parse.
    pub fn new(
        os: impl Into<String>,
        constraint: &str,
        device: Option<impl Into<String>>,
    ) -> Result<Self, ResolveError> {
        let requirement =
            VersionReq::parse(constraint).map_err(|source| ResolveError::InvalidConstraint {
                constraint: constraint.to_string(),
                source,
            })?;

        let device = device.map(Into::into).filter(|d: &String| !d.is_empty());

        Ok(Self {
            os: os.into(),
            requirement,
            device,
        })
    }
}
