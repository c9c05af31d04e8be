//! Name-based cookie resolution against a jar's raw records.

use crate::cookies::jar::Jar;
use crate::cookies::record::CookieRecord;
use crate::error::TagError;
use percent_encoding::percent_decode_str;
use url::Url;

/// Resolve the decoded value of the cookie named `cookie_name` for `url`.
///
/// An unparseable URL is logged and treated as matching nothing, which
/// surfaces as [`TagError::NoCookiesInStore`] carrying the original text;
/// the same error is returned when the jar simply has no applicable record.
/// When records match but none carries the requested name, the error lists
/// every matching name as a correction hint.
///
/// The stored value is percent-decoded before being returned. Decoding is
/// lossy: byte sequences that are not valid UTF-8 come back as replacement
/// characters instead of failing the whole lookup.
pub fn lookup_cookie_value(
    records: &[CookieRecord],
    url: &str,
    cookie_name: &str,
) -> Result<String, TagError> {
    let matched = match Url::parse(url) {
        Ok(target) => Jar::from_records(records).cookies_for_url(&target),
        Err(err) => {
            tracing::warn!(url = %url, error = %err, "failed to find cookie for url");
            Vec::new()
        }
    };

    if matched.is_empty() {
        return Err(TagError::NoCookiesInStore {
            url: url.to_string(),
        });
    }

    match matched.iter().find(|record| record.key == cookie_name) {
        Some(record) => Ok(percent_decode_str(&record.value)
            .decode_utf8_lossy()
            .into_owned()),
        None => Err(TagError::CookieNotFound {
            name: cookie_name.to_string(),
            url: url.to_string(),
            choices: matched.iter().map(|record| record.key.clone()).collect(),
        }),
    }
}
