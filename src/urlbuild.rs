//! Request URL assembly: query strings, joining, and smart encoding.
//!
//! The builder pipeline keeps text raw until the very last step. Query
//! strings are assembled verbatim from rendered parameters, joined onto the
//! URL, and only then run through [`smart_encode_url`], whose single pass
//! encodes each component with its own character set while leaving already
//! percent-encoded escapes untouched. With encoding disabled the URL passes
//! through byte for byte, spaces and all.

use crate::models::RequestParameter;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters percent-encoded in the path component.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Characters percent-encoded in the query component. Narrower than the path
/// set: `=` and `&` carry structure and stay as written.
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'#');

/// Assemble a raw query string from rendered parameter pairs.
///
/// Parameters with an empty name are skipped entirely; a parameter with a
/// name but no value contributes just the name, without `=`. No encoding
/// happens here; [`smart_encode_url`] owns that decision.
pub fn build_query_string(parameters: &[RequestParameter]) -> String {
    let mut pairs = Vec::with_capacity(parameters.len());

    for parameter in parameters {
        if parameter.name.is_empty() {
            continue;
        }
        if parameter.value.is_empty() {
            pairs.push(parameter.name.clone());
        } else {
            pairs.push(format!("{}={}", parameter.name, parameter.value));
        }
    }

    pairs.join("&")
}

/// Append `query` to `url` with `?` or `&` depending on whether the URL
/// already carries a query. A `#fragment` stays at the very end.
pub fn join_url_and_query_string(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    if url.is_empty() {
        return query.to_string();
    }

    let (base, fragment) = match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };

    let joiner = if base.contains('?') { '&' } else { '?' };
    format!("{base}{joiner}{query}{fragment}")
}

/// Prefix `http://` when the URL names no protocol. Whitespace is trimmed
/// first; an effectively empty URL stays empty.
pub fn set_default_protocol(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// Percent-encode a URL without double-encoding it.
///
/// With `encode` false the input is returned unmodified. Otherwise the URL
/// gets a default protocol if it names none, and its path and query are
/// encoded with their component sets. Existing `%XX` escapes survive as
/// written; a bare `%` that does not open a valid escape becomes `%25`. The
/// scheme, authority, and fragment pass through untouched.
pub fn smart_encode_url(url: &str, encode: bool) -> String {
    if !encode {
        return url.to_string();
    }

    let with_protocol = set_default_protocol(url);
    if with_protocol.is_empty() {
        return with_protocol;
    }

    // Everything up to the end of the authority is copied verbatim
    let authority_end = match with_protocol.find("://") {
        Some(scheme_end) => {
            let after_scheme = scheme_end + 3;
            with_protocol[after_scheme..]
                .find(|c: char| c == '/' || c == '?' || c == '#')
                .map_or(with_protocol.len(), |idx| after_scheme + idx)
        }
        None => 0,
    };
    let (head, rest) = with_protocol.split_at(authority_end);

    let (body, fragment) = match rest.find('#') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    let (path, query) = match body.find('?') {
        Some(idx) => body.split_at(idx),
        None => (body, ""),
    };

    let mut out = String::with_capacity(with_protocol.len());
    out.push_str(head);
    out.push_str(&encode_preserving_escapes(path, PATH_ENCODE_SET));
    if !query.is_empty() {
        out.push('?');
        out.push_str(&encode_preserving_escapes(&query[1..], QUERY_ENCODE_SET));
    }
    out.push_str(fragment);
    out
}

/// Encode `component` with `set`, skipping over valid `%XX` escapes and
/// normalizing stray `%` to `%25`.
fn encode_preserving_escapes(component: &str, set: &'static AsciiSet) -> String {
    let mut out = String::with_capacity(component.len());
    let mut rest = component;

    while let Some(pos) = rest.find('%') {
        let (run, tail) = rest.split_at(pos);
        out.extend(utf8_percent_encode(run, set));

        let bytes = tail.as_bytes();
        if bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit() {
            out.push_str(&tail[..3]);
            rest = &tail[3..];
        } else {
            out.push_str("%25");
            rest = &tail[1..];
        }
    }

    out.extend(utf8_percent_encode(rest, set));
    out
}
