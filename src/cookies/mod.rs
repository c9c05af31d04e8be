//! Workspace cookie jars and name-based lookups.
//!
//! A workspace's cookie jar is a plain document: an ordered list of
//! [`CookieRecord`](record::CookieRecord)s exactly as the host stores them.
//! This module layers read-only matching on top of that list:
//!
//! - **Records**: the serde shape of a stored cookie ([`record`])
//! - **Matching**: RFC 6265 domain/path/secure/expiry filtering over the
//!   records, preserving stored order ([`jar`])
//! - **Lookup**: resolving one name to its percent-decoded value, with
//!   correction hints when the name is absent ([`lookup`])
//!
//! # Lookup
//!
//! ```rust
//! use cookietag::cookies::lookup::lookup_cookie_value;
//! use cookietag::cookies::record::CookieRecord;
//!
//! let records = vec![CookieRecord::new("session", "hello%20world").with_domain("example.com")];
//! let value = lookup_cookie_value(&records, "http://example.com/", "session").unwrap();
//! assert_eq!(value, "hello world");
//! ```

pub mod jar;
pub mod lookup;
pub mod record;
