use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;

/// A single cookie entry as stored inside a workspace's cookie jar document.
///
/// The field names mirror the host's JSON shape (`httpOnly`, `hostOnly`,
/// RFC 3339 `expires`), so jar documents deserialize directly into this type.
/// Values are stored exactly as received; percent-decoding happens at lookup
/// time, never at rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    /// Carried for fidelity with the stored document; jar lookups do not
    /// filter on it.
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub host_only: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires: Option<OffsetDateTime>,
}

fn default_path() -> String {
    "/".to_string()
}

impl CookieRecord {
    /// Non-secure, non-host-only session cookie with path `/` and no domain.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            domain: String::new(),
            path: default_path(),
            secure: false,
            http_only: false,
            host_only: false,
            expires: None,
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    #[must_use]
    pub fn with_host_only(mut self, host_only: bool) -> Self {
        self.host_only = host_only;
        self
    }

    #[must_use]
    pub fn with_expires(mut self, expires: OffsetDateTime) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        if let Some(expiry) = self.expires {
            expiry < current_time
        } else {
            false
        }
    }

    /// Build a record from a raw `Set-Cookie` line received for `url`.
    ///
    /// An explicit `Domain` attribute makes the cookie a domain cookie
    /// (leading dot stripped, lowercased); without one the cookie is
    /// host-only on the URL's host. Unparseable lines yield `None`.
    pub fn from_set_cookie(url: &Url, cookie_line: &str) -> Option<Self> {
        use cookie::Cookie;

        let parsed = match Cookie::parse(cookie_line) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(line = %cookie_line, error = %err, "failed to parse set-cookie line");
                return None;
            }
        };

        let (domain, host_only) = match parsed.domain() {
            Some(domain) => (domain.trim_start_matches('.').to_lowercase(), false),
            None => (url.host_str().unwrap_or("").to_lowercase(), true),
        };

        Some(Self {
            key: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path: parsed.path().unwrap_or("/").to_string(),
            secure: parsed.secure().unwrap_or(false),
            http_only: parsed.http_only().unwrap_or(false),
            host_only,
            expires: parsed.expires().and_then(|e| e.datetime()),
        })
    }
}
