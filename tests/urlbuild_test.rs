use cookietag::models::RequestParameter;
use cookietag::urlbuild::{
    build_query_string, join_url_and_query_string, set_default_protocol, smart_encode_url,
};

#[test]
fn test_query_string_joins_pairs() {
    let parameters = vec![
        RequestParameter::new("a", "1"),
        RequestParameter::new("b", "2"),
    ];
    assert_eq!(build_query_string(&parameters), "a=1&b=2");
}

#[test]
fn test_query_string_skips_nameless_params() {
    let parameters = vec![
        RequestParameter::new("", "orphan"),
        RequestParameter::new("kept", "yes"),
    ];
    assert_eq!(build_query_string(&parameters), "kept=yes");
}

#[test]
fn test_query_string_name_only_when_value_empty() {
    let parameters = vec![
        RequestParameter::new("flag", ""),
        RequestParameter::new("q", "term"),
    ];
    assert_eq!(build_query_string(&parameters), "flag&q=term");
}

#[test]
fn test_query_string_keeps_raw_text() {
    // Encoding is smart_encode_url's job, not the builder's
    let parameters = vec![RequestParameter::new("q", "a b")];
    assert_eq!(build_query_string(&parameters), "q=a b");
}

#[test]
fn test_join_picks_separator() {
    assert_eq!(
        join_url_and_query_string("http://x.com/p", "a=1"),
        "http://x.com/p?a=1"
    );
    assert_eq!(
        join_url_and_query_string("http://x.com/p?a=1", "b=2"),
        "http://x.com/p?a=1&b=2"
    );
}

#[test]
fn test_join_keeps_fragment_last() {
    assert_eq!(
        join_url_and_query_string("http://x.com/p#top", "a=1"),
        "http://x.com/p?a=1#top"
    );
    assert_eq!(
        join_url_and_query_string("http://x.com/p?a=1#top", "b=2"),
        "http://x.com/p?a=1&b=2#top"
    );
}

#[test]
fn test_join_empty_sides() {
    assert_eq!(join_url_and_query_string("http://x.com", ""), "http://x.com");
    assert_eq!(join_url_and_query_string("", "a=1"), "a=1");
}

#[test]
fn test_default_protocol_applied_once() {
    assert_eq!(set_default_protocol("x.com"), "http://x.com");
    assert_eq!(set_default_protocol("wss://x.com"), "wss://x.com");
}

#[test]
fn test_smart_encode_spaces_in_query() {
    assert_eq!(
        smart_encode_url("http://x.com?q=a b", true),
        "http://x.com?q=a%20b"
    );
}

#[test]
fn test_smart_encode_disabled_returns_input() {
    assert_eq!(smart_encode_url("http://x.com?q=a b", false), "http://x.com?q=a b");
    // Not even the default protocol is applied when encoding is off
    assert_eq!(smart_encode_url("x.com?q=a b", false), "x.com?q=a b");
}

#[test]
fn test_smart_encode_never_double_encodes() {
    assert_eq!(
        smart_encode_url("http://x.com/p?q=a%20b", true),
        "http://x.com/p?q=a%20b"
    );
}

#[test]
fn test_smart_encode_bare_percent() {
    assert_eq!(
        smart_encode_url("http://x.com/p?discount=50%", true),
        "http://x.com/p?discount=50%25"
    );
}

#[test]
fn test_smart_encode_path_component() {
    assert_eq!(
        smart_encode_url("http://x.com/two words/end", true),
        "http://x.com/two%20words/end"
    );
}

#[test]
fn test_smart_encode_defaults_protocol() {
    assert_eq!(
        smart_encode_url("x.com/a b", true),
        "http://x.com/a%20b"
    );
}

#[test]
fn test_smart_encode_keeps_query_structure() {
    assert_eq!(
        smart_encode_url("http://x.com?a=1&b=two words&c", true),
        "http://x.com?a=1&b=two%20words&c"
    );
}

#[test]
fn test_smart_encode_unicode() {
    assert_eq!(
        smart_encode_url("http://x.com/café?q=café", true),
        "http://x.com/caf%C3%A9?q=caf%C3%A9"
    );
}

#[test]
fn test_pipeline_end_to_end() {
    let parameters = vec![
        RequestParameter::new("q", "a b"),
        RequestParameter::new("page", "1"),
    ];
    let query = build_query_string(&parameters);
    let joined = join_url_and_query_string("http://x.com/search", &query);

    assert_eq!(
        smart_encode_url(&joined, true),
        "http://x.com/search?q=a%20b&page=1"
    );
    assert_eq!(
        smart_encode_url(&joined, false),
        "http://x.com/search?q=a b&page=1"
    );
}
