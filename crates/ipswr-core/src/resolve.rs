//! The resolution pipeline: raw records in, one candidate out.

use ipswr_schema::{Candidate, OsFile, precedence, version};

use crate::error::ResolveError;
use crate::filter;
use crate::query::Query;

/// Resolve the single best-matching firmware download from a stream of
/// raw AppleDB records.
///
/// Each item is one record's raw JSON bytes. Records that fail to
/// decode, carry an unparsable version label, or miss any filter are
/// skipped with a diagnostic; one bad record never aborts the batch.
/// Survivors are ranked by version precedence with release date as the
/// tie-break, and the maximum wins.
///
/// # Errors
///
/// Returns [`ResolveError::NoMatch`] when nothing survives filtering.
pub fn resolve<I, B>(records: I, query: &Query) -> Result<Candidate, ResolveError>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut candidates: Vec<Candidate> = Vec::new();

    for raw in records {
        let record: OsFile = match serde_json::from_slice(raw.as_ref()) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!("skipping undecodable record: {err}");
                continue;
            }
        };
        if let Some(candidate) = evaluate(&record, query) {
            candidates.push(candidate);
        }
    }

    tracing::debug!("{} candidates after filtering", candidates.len());

    // max_by keeps the last of equal elements, so ties behave like a
    // stable ascending sort's final element.
    candidates
        .into_iter()
        .max_by(|a, b| precedence(a, b))
        .ok_or(ResolveError::NoMatch)
}

/// Run one already-decoded record through the filters, producing its
/// candidate if every predicate passes and a link resolves.
pub fn evaluate(record: &OsFile, query: &Query) -> Option<Candidate> {
    // Cheap rejections before version parsing.
    if record.os != query.os || record.sources.is_empty() {
        return None;
    }

    let normalized = match version::normalize(&record.version, record.beta, &record.build) {
        Ok(version) => version,
        Err(err) => {
            tracing::warn!("skipping record: {err}");
            return None;
        }
    };

    if !query.requirement.matches(&normalized) {
        return None;
    }

    let url = filter::select_url(record, query.device.as_deref())?;
    Some(Candidate::new(record, url, normalized))
}
