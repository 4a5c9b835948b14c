//! Request filter parsing.
//!
//! Peers attach a list of typed filters to their POST queries. This module
//! normalizes them into a [`FilterSet`] the store can consume. Bound
//! sanitization (end before start, future timestamps) happens at the store,
//! not here; this is pure intake.

use crate::wire::envelope::ApiResponse;
use crate::wire::types::{Fingerprint, Timestamp};

/// Normalized view of a request's filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub fingerprints: Vec<Fingerprint>,
    pub time_start: Timestamp,
    pub time_end: Timestamp,
    pub embeds: Vec<String>,
}

impl FilterSet {
    /// Extracts the filter set from an incoming request envelope.
    ///
    /// Recognized filter types are `fingerprint`, `embed` and `timestamp`;
    /// anything else is ignored. A `timestamp` filter takes effect only when
    /// at least one bound is positive, and malformed or missing bound values
    /// parse as zero.
    pub fn from_request(req: &ApiResponse) -> Self {
        let mut set = FilterSet::default();
        for filter in &req.filters {
            match filter.filter_type.as_str() {
                "fingerprint" => {
                    for value in &filter.values {
                        set.fingerprints.push(Fingerprint::new(value));
                    }
                }
                "embed" => {
                    set.embeds.extend(filter.values.iter().cloned());
                }
                "timestamp" => {
                    let start = parse_bound(filter.values.first());
                    let end = parse_bound(filter.values.get(1));
                    // An all-zero range means the filter is inactive.
                    if start > 0 || end > 0 {
                        set.time_start = start;
                        set.time_end = end;
                    }
                }
                _ => {}
            }
        }
        set
    }
}

fn parse_bound(value: Option<&String>) -> Timestamp {
    value.and_then(|v| v.parse::<Timestamp>().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::envelope::Filter;

    fn request_with(filters: Vec<Filter>) -> ApiResponse {
        ApiResponse {
            filters,
            ..Default::default()
        }
    }

    fn filter(filter_type: &str, values: &[&str]) -> Filter {
        Filter {
            filter_type: filter_type.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_fingerprint_and_timestamp_filters() {
        let req = request_with(vec![
            filter("timestamp", &["100", "200"]),
            filter("fingerprint", &["abc"]),
        ]);
        let set = FilterSet::from_request(&req);
        assert_eq!(set.fingerprints, vec![Fingerprint::new("abc")]);
        assert_eq!(set.time_start, 100);
        assert_eq!(set.time_end, 200);
        assert!(set.embeds.is_empty());
    }

    #[test]
    fn test_zero_timestamp_filter_is_inactive() {
        let req = request_with(vec![filter("timestamp", &["0", "0"])]);
        let set = FilterSet::from_request(&req);
        assert_eq!(set.time_start, 0);
        assert_eq!(set.time_end, 0);
    }

    #[test]
    fn test_half_open_window_applies() {
        let req = request_with(vec![filter("timestamp", &["0", "900"])]);
        let set = FilterSet::from_request(&req);
        assert_eq!(set.time_start, 0);
        assert_eq!(set.time_end, 900);
    }

    #[test]
    fn test_malformed_bounds_parse_as_zero() {
        let req = request_with(vec![filter("timestamp", &["soon", "400"])]);
        let set = FilterSet::from_request(&req);
        assert_eq!(set.time_start, 0);
        assert_eq!(set.time_end, 400);

        // Missing second value behaves the same way.
        let req = request_with(vec![filter("timestamp", &["400"])]);
        let set = FilterSet::from_request(&req);
        assert_eq!(set.time_start, 400);
        assert_eq!(set.time_end, 0);
    }

    #[test]
    fn test_embeds_accumulate() {
        let req = request_with(vec![
            filter("embed", &["threads"]),
            filter("embed", &["posts"]),
        ]);
        let set = FilterSet::from_request(&req);
        assert_eq!(set.embeds, vec!["threads".to_string(), "posts".to_string()]);
    }

    #[test]
    fn test_unknown_filter_types_ignored() {
        let req = request_with(vec![filter("geolocation", &["here"])]);
        assert_eq!(FilterSet::from_request(&req), FilterSet::default());
    }

    #[test]
    fn test_multiple_fingerprint_filters_accumulate() {
        let req = request_with(vec![
            filter("fingerprint", &["a", "b"]),
            filter("fingerprint", &["c"]),
        ]);
        let set = FilterSet::from_request(&req);
        assert_eq!(
            set.fingerprints,
            vec![
                Fingerprint::new("a"),
                Fingerprint::new("b"),
                Fingerprint::new("c")
            ]
        );
    }
}
