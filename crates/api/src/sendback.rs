//! Redirect (sendback) URL construction for state-changing requests.
//!
//! Every bulk action answers with a redirect back to the listing, carrying
//! result counters and preserving the page the user was on. The base URL
//! comes from the submitted referer field, then the `Referer` header, then
//! a safe default landing path; only the path and query of a referer are
//! ever kept, so a forged referer cannot redirect off the service.

use url::Url;

/// Dummy base used to parse and manipulate relative URLs.
const DUMMY_BASE: &str = "http://sendback.invalid";

/// Query parameters that never survive onto a redirect URL.
pub const TRANSIENT_PARAMS: &[&str] = &["action", "action2", "_token", "_wp_http_referer"];

/// A redirect URL under construction.
#[derive(Debug, Clone)]
pub struct Sendback {
    url: Url,
}

impl Sendback {
    /// Resolve the redirect base.
    ///
    /// Preference order: the `_wp_http_referer` form field, the `Referer`
    /// header, then `fallback` (the listing path). Absolute referers are
    /// reduced to their path and query.
    pub fn resolve(
        referer_param: Option<&str>,
        referer_header: Option<&str>,
        fallback: &str,
    ) -> Self {
        let base = Url::parse(DUMMY_BASE).expect("dummy base URL is valid");

        let candidate = referer_param
            .filter(|r| !r.is_empty())
            .or(referer_header.filter(|r| !r.is_empty()))
            .and_then(|r| base.join(r).ok());

        let url = match candidate {
            Some(parsed) => {
                // Re-root onto the dummy base: keeps path + query, drops
                // whatever host the referer claimed.
                let path_and_query = match parsed.query() {
                    Some(q) => format!("{}?{}", parsed.path(), q),
                    None => parsed.path().to_string(),
                };
                base.join(&path_and_query).unwrap_or(base)
            }
            None => base.join(fallback).unwrap_or(base),
        };

        Sendback { url }
    }

    /// Set a query parameter, replacing any existing values for the key.
    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        let kept: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        self.rebuild_query(kept, &[(key, value)]);
        self
    }

    /// Append one pair per value without touching existing pairs.
    pub fn append_all(&mut self, key: &str, values: &[i64]) -> &mut Self {
        let kept: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let appended: Vec<(String, String)> = values
            .iter()
            .map(|v| (key.to_string(), v.to_string()))
            .collect();
        let appended_refs: Vec<(&str, &str)> = appended
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        self.rebuild_query(kept, &appended_refs);
        self
    }

    /// Remove every value for each of the given keys.
    pub fn remove(&mut self, keys: &[&str]) -> &mut Self {
        let kept: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(k, _)| !keys.contains(&k.as_ref()))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        self.rebuild_query(kept, &[]);
        self
    }

    /// The finished relative URL (path plus query).
    pub fn into_path_and_query(self) -> String {
        match self.url.query() {
            Some(q) if !q.is_empty() => format!("{}?{}", self.url.path(), q),
            _ => self.url.path().to_string(),
        }
    }

    fn rebuild_query(&mut self, kept: Vec<(String, String)>, appended: &[(&str, &str)]) {
        self.url.set_query(None);
        if kept.is_empty() && appended.is_empty() {
            return;
        }
        let mut pairs = self.url.query_pairs_mut();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        for (k, v) in appended {
            pairs.append_pair(k, v);
        }
    }
}
