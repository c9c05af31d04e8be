//! Host-injected capabilities available to template tags.
//!
//! A template tag runs inside a host application and touches host state only
//! through this surface: a [`RenderDelegate`] that resolves nested template
//! expressions and a [`ModelStore`] that fetches documents by id. Both are
//! trait objects returning boxed futures, so hosts with any async backend
//! can implement them without this crate naming a runtime.

use crate::error::TagError;
use crate::models::{CookieJar, Request, Workspace};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Alias for the `Future` type returned by host model lookups.
pub type ModelFuture<T> = Pin<Box<dyn Future<Output = Result<T, TagError>> + Send>>;

/// Alias for the `Future` type returned by host template rendering.
pub type RenderFuture = Pin<Box<dyn Future<Output = Result<String, TagError>> + Send>>;

/// Identifiers describing where a tag is being evaluated.
///
/// Both ids are optional: a tag previewed outside any request (for example
/// in a standalone template editor) carries neither, and evaluation then
/// short-circuits to "no value" instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMeta {
    pub request_id: Option<String>,
    pub workspace_id: Option<String>,
}

impl TagMeta {
    /// Meta for a tag evaluated on a concrete request in a workspace.
    pub fn for_request(request_id: impl Into<String>, workspace_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            workspace_id: Some(workspace_id.into()),
        }
    }

    /// Both ids, or `None` when either is missing.
    pub fn ids(&self) -> Option<(&str, &str)> {
        match (self.request_id.as_deref(), self.workspace_id.as_deref()) {
            (Some(request_id), Some(workspace_id)) => Some((request_id, workspace_id)),
            _ => None,
        }
    }
}

/// Trait for the host's template renderer.
///
/// Implementations must be thread-safe and must not borrow `template` into
/// the returned future; clone what the future needs.
pub trait RenderDelegate: Send + Sync {
    /// Resolves every template expression in `template` to plain text.
    fn render(&self, template: &str) -> RenderFuture;
}

/// Blanket implementation for Arc-wrapped renderers.
impl<R: RenderDelegate + ?Sized> RenderDelegate for Arc<R> {
    fn render(&self, template: &str) -> RenderFuture {
        (**self).render(template)
    }
}

/// Trait for host document access.
///
/// Lookups by id return `Ok(None)` for missing documents; `Err` is reserved
/// for storage-level failures. Implementations must be thread-safe.
pub trait ModelStore: Send + Sync {
    /// Fetches a workspace document by id.
    fn workspace_by_id(&self, workspace_id: &str) -> ModelFuture<Option<Workspace>>;

    /// Fetches a request document by id.
    fn request_by_id(&self, request_id: &str) -> ModelFuture<Option<Request>>;

    /// Fetches the workspace's cookie jar, creating an empty jar if the
    /// workspace has none yet. This is the only write a tag can cause.
    fn cookie_jar_for_workspace(&self, workspace: &Workspace) -> ModelFuture<CookieJar>;
}

/// Blanket implementation for Arc-wrapped stores.
impl<S: ModelStore + ?Sized> ModelStore for Arc<S> {
    fn workspace_by_id(&self, workspace_id: &str) -> ModelFuture<Option<Workspace>> {
        (**self).workspace_by_id(workspace_id)
    }

    fn request_by_id(&self, request_id: &str) -> ModelFuture<Option<Request>> {
        (**self).request_by_id(request_id)
    }

    fn cookie_jar_for_workspace(&self, workspace: &Workspace) -> ModelFuture<CookieJar> {
        (**self).cookie_jar_for_workspace(workspace)
    }
}

/// Everything a tag receives from the host for one evaluation: the meta ids
/// plus the capability handles. Cheap to clone; tags that need a `'static`
/// future clone the context into it.
#[derive(Clone)]
pub struct TagContext {
    meta: TagMeta,
    renderer: Arc<dyn RenderDelegate>,
    models: Arc<dyn ModelStore>,
}

impl TagContext {
    pub fn new(
        meta: TagMeta,
        renderer: Arc<dyn RenderDelegate>,
        models: Arc<dyn ModelStore>,
    ) -> Self {
        Self {
            meta,
            renderer,
            models,
        }
    }

    /// Get the evaluation meta.
    pub fn meta(&self) -> &TagMeta {
        &self.meta
    }

    /// Get the host's template renderer.
    pub fn renderer(&self) -> &Arc<dyn RenderDelegate> {
        &self.renderer
    }

    /// Get the host's document store.
    pub fn models(&self) -> &Arc<dyn ModelStore> {
        &self.models
    }

    /// Render a template through the host's renderer.
    pub fn render(&self, template: &str) -> RenderFuture {
        self.renderer.render(template)
    }
}

impl fmt::Debug for TagContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagContext")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_ids_requires_both() {
        assert_eq!(TagMeta::default().ids(), None);

        let partial = TagMeta {
            request_id: Some("req_1".to_string()),
            workspace_id: None,
        };
        assert_eq!(partial.ids(), None);

        let full = TagMeta::for_request("req_1", "wrk_1");
        assert_eq!(full.ids(), Some(("req_1", "wrk_1")));
    }

    struct EchoRenderer;

    impl RenderDelegate for EchoRenderer {
        fn render(&self, template: &str) -> RenderFuture {
            let rendered = template.to_string();
            Box::pin(async move { Ok(rendered) })
        }
    }

    #[tokio::test]
    async fn test_arc_blanket_impl_dispatches() {
        let renderer: Arc<dyn RenderDelegate> = Arc::new(EchoRenderer);
        let rendered = renderer.render("plain text").await.unwrap();
        assert_eq!(rendered, "plain text");
    }
}
