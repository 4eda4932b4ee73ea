//! Source qualification and link selection.
//!
//! A record offers several sources (one per artifact kind and device
//! group), each with several mirror links. Two axes decide which sources
//! qualify: the artifact type must be an IPSW, and when the caller named
//! a device, the source's device map must contain it. Among qualifying
//! links exactly one URL is selected.

use ipswr_schema::{IPSW_SOURCE_TYPE, Link, OsFile, Source};

/// Whether a source passes the type and device axes of the filter.
///
/// Device matching is a case-sensitive exact membership test; with no
/// device given, every source qualifies on that axis.
pub fn source_qualifies(source: &Source, device: Option<&str>) -> bool {
    if source.type_ != IPSW_SOURCE_TYPE {
        return false;
    }
    match device {
        Some(device) => source.device_map.iter().any(|d| d == device),
        None => true,
    }
}

/// Select the single download URL for a record, or `None` when no
/// qualifying source has an eligible link.
///
/// Links are visited in listing order across all qualifying sources.
/// Only active links are eligible. The running pick is replaced when
/// nothing is picked yet, or when the new link is preferred and the
/// current pick is not -- so a preferred link beats any earlier
/// non-preferred one, and among several preferred links the first
/// encountered wins.
pub fn select_url<'a>(record: &'a OsFile, device: Option<&str>) -> Option<&'a str> {
    let mut picked: Option<&Link> = None;

    for source in record
        .sources
        .iter()
        .filter(|source| source_qualifies(source, device))
    {
        for link in &source.links {
            if !link.active {
                continue;
            }
            let replace = match picked {
                None => true,
                Some(current) => link.preferred && !current.preferred,
            };
            if replace {
                picked = Some(link);
            }
        }
    }

    picked.map(|link| link.url.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(url: &str, preferred: bool, active: bool) -> Link {
        Link {
            url: url.into(),
            preferred,
            active,
        }
    }

    fn source(type_: &str, devices: &[&str], links: Vec<Link>) -> Source {
        Source {
            type_: type_.into(),
            device_map: devices.iter().map(ToString::to_string).collect(),
            links,
            hashes: ipswr_schema::SourceHashes::default(),
            size: 0,
        }
    }

    fn record(sources: Vec<Source>) -> OsFile {
        OsFile {
            os: "iOS".into(),
            version: "16.0".into(),
            build: "20A362".into(),
            released: "2022-09-12".into(),
            beta: false,
            sources,
        }
    }

    #[test]
    fn test_preferred_beats_earlier_non_preferred() {
        let record = record(vec![source(
            "ipsw",
            &["iPhone11,2"],
            vec![link("X", false, true), link("Y", true, true)],
        )]);
        assert_eq!(select_url(&record, None), Some("Y"));
    }

    #[test]
    fn test_first_preferred_wins() {
        let record = record(vec![source(
            "ipsw",
            &["iPhone11,2"],
            vec![link("A", true, true), link("B", true, true)],
        )]);
        assert_eq!(select_url(&record, None), Some("A"));
    }

    #[test]
    fn test_non_preferred_never_replaces() {
        let record = record(vec![source(
            "ipsw",
            &[],
            vec![link("A", false, true), link("B", false, true)],
        )]);
        assert_eq!(select_url(&record, None), Some("A"));
    }

    #[test]
    fn test_inactive_links_are_ineligible() {
        let mixed = record(vec![source(
            "ipsw",
            &[],
            vec![link("dead", true, false), link("alive", false, true)],
        )]);
        assert_eq!(select_url(&mixed, None), Some("alive"));

        let all_dead = record(vec![source("ipsw", &[], vec![link("x", true, false)])]);
        assert_eq!(select_url(&all_dead, None), None);
    }

    #[test]
    fn test_preferred_link_in_later_source_replaces() {
        let record = record(vec![
            source("ipsw", &[], vec![link("mirror", false, true)]),
            source("ipsw", &[], vec![link("apple", true, true)]),
        ]);
        assert_eq!(select_url(&record, None), Some("apple"));
    }

    #[test]
    fn test_device_filter_is_exact_membership() {
        let record = record(vec![
            source("ipsw", &["iPhone11,2"], vec![link("narrow", false, true)]),
            source("ipsw", &["iPhone11,4"], vec![link("other", false, true)]),
        ]);
        assert_eq!(select_url(&record, Some("iPhone11,4")), Some("other"));
        assert_eq!(select_url(&record, Some("iphone11,4")), None);
        assert_eq!(select_url(&record, None), Some("narrow"));
    }

    #[test]
    fn test_only_ipsw_sources_qualify() {
        let record = record(vec![
            source("ota", &[], vec![link("ota-url", true, true)]),
            source("installassistant", &[], vec![link("ia-url", true, true)]),
        ]);
        assert_eq!(select_url(&record, None), None);
    }
}
