use crate::cookies::record::CookieRecord;
use time::OffsetDateTime;
use url::Url;

/// A transient, read-only view over a jar document's cookie records.
///
/// The view borrows the records rather than indexing them: jars are queried
/// once per tag evaluation and are small, so a linear scan in stored order is
/// both sufficient and what keeps lookups deterministic. Matching is loose on
/// purpose. The host accepts whatever the user put in the jar editor, so no
/// public-suffix or prefix validation happens here; a record either applies
/// to the URL under RFC 6265 domain/path/secure/expiry rules or it does not.
#[derive(Debug, Clone, Copy)]
pub struct Jar<'a> {
    records: &'a [CookieRecord],
}

impl<'a> Jar<'a> {
    pub fn from_records(records: &'a [CookieRecord]) -> Self {
        Self { records }
    }

    /// Collect the records applicable to `url`, preserving stored order.
    ///
    /// When two records share a name, stored order decides which one a
    /// name-based lookup sees first; there is no path-length re-sort.
    pub fn cookies_for_url(&self, url: &Url) -> Vec<&'a CookieRecord> {
        let host = url.host_str().unwrap_or("");
        let now = OffsetDateTime::now_utc();
        let mut result = Vec::new();

        for record in self.records {
            if !Self::domain_matches(&record.domain, host, record.host_only) {
                continue;
            }

            if !Self::path_matches(&record.path, url.path()) {
                continue;
            }

            // Secure cookies only travel over https
            if record.secure && url.scheme() != "https" {
                continue;
            }

            if record.is_expired(now) {
                continue;
            }

            result.push(record);
        }

        result
    }

    /// RFC 6265 domain matching.
    fn domain_matches(cookie_domain: &str, request_host: &str, host_only: bool) -> bool {
        // A record without a domain can never match
        if cookie_domain.is_empty() {
            return false;
        }

        if host_only {
            // Host-only cookie: exact match required
            return cookie_domain.eq_ignore_ascii_case(request_host);
        }

        // Domain cookie: suffix match
        let cookie_domain = cookie_domain.trim_start_matches('.');

        if request_host.eq_ignore_ascii_case(cookie_domain) {
            return true;
        }

        // Check if request_host ends with .cookie_domain
        if request_host.len() > cookie_domain.len() {
            let suffix = &request_host[request_host.len() - cookie_domain.len()..];
            if suffix.eq_ignore_ascii_case(cookie_domain) {
                // The character before the suffix must be a dot
                let char_before = request_host
                    .chars()
                    .nth(request_host.len() - cookie_domain.len() - 1);
                return char_before == Some('.');
            }
        }

        false
    }

    /// RFC 6265 path matching.
    fn path_matches(cookie_path: &str, request_path: &str) -> bool {
        if request_path == cookie_path {
            return true;
        }

        if request_path.starts_with(cookie_path) {
            // Cookie path is a prefix
            if cookie_path.ends_with('/') {
                return true;
            }
            // The next character in request_path must be '/'
            let next_char = request_path.chars().nth(cookie_path.len());
            return next_char == Some('/');
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_matches_host_only_exact() {
        assert!(Jar::domain_matches("example.com", "example.com", true));
        assert!(Jar::domain_matches("Example.COM", "example.com", true));
        assert!(!Jar::domain_matches("example.com", "sub.example.com", true));
    }

    #[test]
    fn test_domain_matches_suffix_on_dot_boundary() {
        assert!(Jar::domain_matches("example.com", "example.com", false));
        assert!(Jar::domain_matches("example.com", "sub.example.com", false));
        assert!(Jar::domain_matches(".example.com", "sub.example.com", false));
        assert!(!Jar::domain_matches("example.com", "badexample.com", false));
        assert!(!Jar::domain_matches("example.com", "other.org", false));
    }

    #[test]
    fn test_empty_domain_never_matches() {
        assert!(!Jar::domain_matches("", "example.com", false));
        assert!(!Jar::domain_matches("", "", true));
    }

    #[test]
    fn test_path_matches_boundaries() {
        assert!(Jar::path_matches("/", "/anything"));
        assert!(Jar::path_matches("/foo", "/foo"));
        assert!(Jar::path_matches("/foo", "/foo/bar"));
        assert!(Jar::path_matches("/foo/", "/foo/bar"));
        assert!(!Jar::path_matches("/foo", "/foobar"));
        assert!(!Jar::path_matches("/foo", "/"));
    }
}
