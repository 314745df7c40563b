//! Raw request parameter access for the listing and bulk-action surface.
//!
//! The listing form's wire format repeats keys (`event_ids=3&event_ids=7`,
//! with the legacy bracket form `event_ids[]=3` also accepted), which the
//! serde-backed `Query` extractor rejects as a duplicate field. This module
//! keeps every decoded pair and lets handlers pull single values or
//! collections by key.

use url::form_urlencoded;

/// Decoded key/value pairs from a query string and, for POSTs, a
/// form-encoded body. Pairs keep their arrival order; query pairs come
/// before body pairs.
#[derive(Debug, Default)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    /// Parse from an optional query string and an optional form body.
    pub fn parse(query: Option<&str>, body: Option<&str>) -> Self {
        let mut pairs = Vec::new();
        for source in [query, body].into_iter().flatten() {
            pairs.extend(
                form_urlencoded::parse(source.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned())),
            );
        }
        RequestParams { pairs }
    }

    /// Parse from a query string only.
    pub fn from_query(query: Option<&str>) -> Self {
        Self::parse(query, None)
    }

    /// First value for `key`, if present.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| matches_key(k, key))
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, treating the empty string as absent.
    pub fn first_non_empty(&self, key: &str) -> Option<&str> {
        self.first(key).filter(|v| !v.is_empty())
    }

    /// Every value for `key`, in arrival order.
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| matches_key(k, key))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Every value for `key` that parses as an id. Unparsable values are
    /// dropped rather than failing the request.
    pub fn ids(&self, key: &str) -> Vec<i64> {
        self.all(key)
            .into_iter()
            .filter_map(|v| v.parse::<i64>().ok())
            .collect()
    }

    /// Whether `key` appears at all (even with an empty value).
    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| matches_key(k, key))
    }

    /// Owned copy of the first value for `key`.
    pub fn first_owned(&self, key: &str) -> Option<String> {
        self.first(key).map(str::to_string)
    }
}

/// A stored key matches a requested key exactly or with a `[]` suffix.
fn matches_key(stored: &str, requested: &str) -> bool {
    stored == requested || (stored.strip_suffix("[]") == Some(requested))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_pairs() {
        let params = RequestParams::from_query(Some("s=logged+in&paged=2"));
        assert_eq!(params.first("s"), Some("logged in"));
        assert_eq!(params.first("paged"), Some("2"));
        assert_eq!(params.first("missing"), None);
    }

    #[test]
    fn merges_query_and_body() {
        let params = RequestParams::parse(Some("paged=2"), Some("action=trash"));
        assert_eq!(params.first("paged"), Some("2"));
        assert_eq!(params.first("action"), Some("trash"));
    }

    #[test]
    fn collects_repeated_keys() {
        let params = RequestParams::from_query(Some("event_ids=3&event_ids=7&event_ids=11"));
        assert_eq!(params.ids("event_ids"), vec![3, 7, 11]);
    }

    #[test]
    fn accepts_bracket_suffix_form() {
        let params = RequestParams::from_query(Some("event_ids%5B%5D=3&event_ids%5B%5D=7"));
        assert_eq!(params.ids("event_ids"), vec![3, 7]);
    }

    #[test]
    fn drops_unparsable_ids() {
        let params = RequestParams::from_query(Some("event_ids=3&event_ids=abc&event_ids=7"));
        assert_eq!(params.ids("event_ids"), vec![3, 7]);
    }

    #[test]
    fn first_non_empty_skips_empty_values() {
        let params = RequestParams::from_query(Some("action=&paged=2"));
        assert_eq!(params.first("action"), Some(""));
        assert_eq!(params.first_non_empty("action"), None);
    }

    #[test]
    fn decodes_percent_encoding() {
        let params = RequestParams::from_query(Some("filter_event=User%20logged%20in."));
        assert_eq!(params.first("filter_event"), Some("User logged in."));
    }
}
