//! # cookietag
//!
//! A workspace cookie-jar template tag for API client hosts.
//!
//! `cookietag` implements the `cookieDecode` template tag: given a cookie
//! name and either an explicit URL or the URL the current request would be
//! sent to, it resolves the matching cookie from the workspace's cookie jar
//! and produces its percent-decoded value. The host application is reached
//! only through injected capability traits, so the crate embeds in any
//! async host.
//!
//! ## Features
//!
//! - **Cookie Matching**: RFC 6265 domain/path/secure/expiry rules over raw
//!   jar records, in stored order
//! - **Request URL Building**: template rendering, query-string assembly,
//!   and smart percent-encoding that never double-encodes
//! - **Host Injection**: `RenderDelegate` and `ModelStore` trait objects
//!   with boxed futures, no runtime dependency
//! - **Tag Surface**: declarations with conditional argument visibility,
//!   plus a name-keyed registry
//! - **Test Host**: a complete in-memory host for tests and docs
//!
//! ## Quick Start
//!
//! ```rust
//! use cookietag::cookies::record::CookieRecord;
//! use cookietag::models::{CookieJar, Workspace};
//! use cookietag::resolver::resolve_cookie_value;
//! use cookietag::testing::InMemoryHost;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let jar = CookieJar::new("jar_1", "Default Jar")
//!     .with_cookie(CookieRecord::new("session", "hello%20world").with_domain("example.com"));
//!
//! let host = InMemoryHost::new()
//!     .with_workspace(Workspace::new("wrk_1", "My Workspace"))
//!     .with_jar("wrk_1", jar);
//!
//! let ctx = host.context_for("req_1", "wrk_1");
//! let value = resolve_cookie_value(&ctx, true, "session", Some("http://example.com/"))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(value.as_deref(), Some("hello world"));
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`cookies`] - Jar records, RFC 6265 matching, and name lookup
//! - [`error`] - The `TagError` taxonomy with user-facing messages
//! - [`host`] - Injected host capabilities and the evaluation context
//! - [`models`] - Host document shapes (workspace, request, jar)
//! - [`resolver`] - The tag's end-to-end resolution sequence
//! - [`tag`] - Tag declarations, argument values, and the registry
//! - [`testing`] - In-memory host implementation
//! - [`urlbuild`] - Query strings, URL joining, and smart encoding

pub mod cookies;
pub mod error;
pub mod host;
pub mod models;
pub mod resolver;
pub mod tag;
pub mod testing;
pub mod urlbuild;
