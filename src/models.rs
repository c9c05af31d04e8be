//! Host document models.
//!
//! These are the JSON document shapes the host hands over through
//! [`ModelStore`](crate::host::ModelStore): camelCase fields, `_id` for the
//! document id. Only the fields this crate reads are modeled; hosts carry
//! more and serde ignores the rest.

use crate::cookies::record::CookieRecord;
use serde::{Deserialize, Serialize};

/// A workspace document. Cookie jars are scoped to one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Workspace {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single query parameter row on a request, stored unrendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameter {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl RequestParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A request document: the URL and parameters may contain template
/// expressions and are rendered before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub parameters: Vec<RequestParameter>,
    /// Per-request toggle for smart URL encoding. Hosts default it on.
    #[serde(default = "default_encode_url")]
    pub setting_encode_url: bool,
}

fn default_encode_url() -> bool {
    true
}

impl Request {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            parameters: Vec::new(),
            setting_encode_url: true,
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(RequestParameter::new(name, value));
        self
    }

    #[must_use]
    pub fn with_encode_url(mut self, encode: bool) -> Self {
        self.setting_encode_url = encode;
        self
    }
}

/// A workspace's cookie jar document: an ordered list of raw records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieJar {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cookies: Vec<CookieRecord>,
}

impl CookieJar {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cookies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cookie(mut self, record: CookieRecord) -> Self {
        self.cookies.push(record);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_document_shape() {
        let json = r#"{
            "_id": "req_1",
            "url": "http://example.com/{{ path }}",
            "parameters": [{"name": "q", "value": "{{ term }}"}],
            "settingEncodeUrl": false
        }"#;

        let request: Request = serde_json::from_str(json).unwrap();
        assert_eq!(request.id, "req_1");
        assert_eq!(request.parameters.len(), 1);
        assert!(!request.setting_encode_url);
    }

    #[test]
    fn test_encode_url_defaults_on() {
        let request: Request = serde_json::from_str(r#"{"_id": "req_1"}"#).unwrap();
        assert!(request.setting_encode_url);
    }

    #[test]
    fn test_jar_document_shape() {
        let json = r#"{
            "_id": "jar_1",
            "name": "Default Jar",
            "cookies": [{"key": "session", "value": "abc", "domain": "example.com"}]
        }"#;

        let jar: CookieJar = serde_json::from_str(json).unwrap();
        assert_eq!(jar.id, "jar_1");
        assert_eq!(jar.cookies.len(), 1);
        assert_eq!(jar.cookies[0].key, "session");
    }
}
