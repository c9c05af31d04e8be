//! In-memory host for tests, docs, and benches.
//!
//! [`InMemoryHost`] implements both host capability traits over plain maps:
//! workspaces, requests, and jars are registered up front with builder
//! methods, and rendering substitutes `{{ variable }}` expressions from a
//! configured map. It exists so tag behavior can be exercised without a real
//! host application; nothing in it is specific to tests beyond that.

use crate::error::TagError;
use crate::host::{
    ModelFuture, ModelStore, RenderDelegate, RenderFuture, TagContext, TagMeta,
};
use crate::models::{CookieJar, Request, Workspace};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A self-contained host backing every context capability from memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryHost {
    workspaces: HashMap<String, Workspace>,
    requests: HashMap<String, Request>,
    /// Jar documents keyed by workspace id.
    jars: HashMap<String, CookieJar>,
    render_vars: HashMap<String, String>,
    fail_render: bool,
    fail_models: bool,
    /// Shared across clones so contexts report back to the original host.
    model_fetches: Arc<AtomicUsize>,
}

impl InMemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a workspace document.
    #[must_use]
    pub fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspaces.insert(workspace.id.clone(), workspace);
        self
    }

    /// Registers a request document.
    #[must_use]
    pub fn with_request(mut self, request: Request) -> Self {
        self.requests.insert(request.id.clone(), request);
        self
    }

    /// Registers a cookie jar for a workspace.
    #[must_use]
    pub fn with_jar(mut self, workspace_id: impl Into<String>, jar: CookieJar) -> Self {
        self.jars.insert(workspace_id.into(), jar);
        self
    }

    /// Makes `{{ name }}` render to `value`.
    #[must_use]
    pub fn with_render_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.render_vars.insert(name.into(), value.into());
        self
    }

    /// Makes every render call fail, simulating a template the host's
    /// engine rejects.
    #[must_use]
    pub fn failing_render(mut self) -> Self {
        self.fail_render = true;
        self
    }

    /// Makes every model lookup fail, simulating a host whose data layer
    /// is unreachable.
    #[must_use]
    pub fn failing_models(mut self) -> Self {
        self.fail_models = true;
        self
    }

    /// Builds a context whose meta points at the given request/workspace.
    pub fn context_for(
        &self,
        request_id: impl Into<String>,
        workspace_id: impl Into<String>,
    ) -> TagContext {
        self.context_with_meta(TagMeta::for_request(request_id, workspace_id))
    }

    /// Builds a context with no meta ids, like a tag previewed outside any
    /// request.
    pub fn anonymous_context(&self) -> TagContext {
        self.context_with_meta(TagMeta::default())
    }

    fn context_with_meta(&self, meta: TagMeta) -> TagContext {
        let host = Arc::new(self.clone());
        TagContext::new(meta, host.clone(), host)
    }

    /// How many model lookups contexts built from this host have performed.
    pub fn model_fetch_count(&self) -> usize {
        self.model_fetches.load(Ordering::SeqCst)
    }

    /// Replace each `{{ name }}` with its configured variable; unknown
    /// expressions stay as written.
    fn substitute(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            let (head, tail) = rest.split_at(open);
            out.push_str(head);

            match tail.find("}}") {
                Some(close) => {
                    let expression = &tail[2..close];
                    match self.render_vars.get(expression.trim()) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&tail[..close + 2]),
                    }
                    rest = &tail[close + 2..];
                }
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

impl RenderDelegate for InMemoryHost {
    fn render(&self, template: &str) -> RenderFuture {
        if self.fail_render {
            let message = format!("host refused to render {template:?}");
            return Box::pin(std::future::ready(Err(TagError::Render { message })));
        }

        let rendered = self.substitute(template);
        Box::pin(std::future::ready(Ok(rendered)))
    }
}

impl ModelStore for InMemoryHost {
    fn workspace_by_id(&self, workspace_id: &str) -> ModelFuture<Option<Workspace>> {
        self.model_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_models {
            let message = format!("host refused workspace lookup for {workspace_id:?}");
            return Box::pin(std::future::ready(Err(TagError::host(message))));
        }
        let found = self.workspaces.get(workspace_id).cloned();
        Box::pin(std::future::ready(Ok(found)))
    }

    fn request_by_id(&self, request_id: &str) -> ModelFuture<Option<Request>> {
        self.model_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_models {
            let message = format!("host refused request lookup for {request_id:?}");
            return Box::pin(std::future::ready(Err(TagError::host(message))));
        }
        let found = self.requests.get(request_id).cloned();
        Box::pin(std::future::ready(Ok(found)))
    }

    fn cookie_jar_for_workspace(&self, workspace: &Workspace) -> ModelFuture<CookieJar> {
        self.model_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_models {
            let message = format!("host refused jar lookup for workspace {:?}", workspace.id);
            return Box::pin(std::future::ready(Err(TagError::host(message))));
        }
        // Missing jar means the workspace has none yet: hand out a fresh
        // empty document, the moral equivalent of get-or-create
        let jar = self.jars.get(&workspace.id).cloned().unwrap_or_default();
        Box::pin(std::future::ready(Ok(jar)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_known_and_unknown() {
        let host = InMemoryHost::new().with_render_var("base", "http://example.com");
        assert_eq!(
            host.substitute("{{ base }}/api/{{ missing }}"),
            "http://example.com/api/{{ missing }}"
        );
    }

    #[test]
    fn test_substitute_unterminated_expression() {
        let host = InMemoryHost::new().with_render_var("base", "x");
        assert_eq!(host.substitute("{{ base }}/{{ tail"), "x/{{ tail");
    }

    #[tokio::test]
    async fn test_render_failure_mode() {
        let host = InMemoryHost::new().failing_render();
        let err = host.render("{{ anything }}").await.unwrap_err();
        assert!(matches!(err, TagError::Render { .. }));
    }

    #[tokio::test]
    async fn test_model_failure_mode() {
        // The document exists; the failure mode wins anyway
        let host = InMemoryHost::new()
            .with_workspace(Workspace::new("wrk_1", "W"))
            .failing_models();
        let err = host.workspace_by_id("wrk_1").await.unwrap_err();
        assert!(matches!(err, TagError::Host { .. }));
    }

    #[tokio::test]
    async fn test_missing_jar_is_created_empty() {
        let host = InMemoryHost::new().with_workspace(Workspace::new("wrk_1", "W"));
        let workspace = Workspace::new("wrk_1", "W");
        let jar = host.cookie_jar_for_workspace(&workspace).await.unwrap();
        assert!(jar.cookies.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_counter_shared_with_contexts() {
        let host = InMemoryHost::new().with_workspace(Workspace::new("wrk_1", "W"));
        let ctx = host.context_for("req_1", "wrk_1");

        assert_eq!(host.model_fetch_count(), 0);
        let _ = ctx.models().workspace_by_id("wrk_1").await.unwrap();
        assert_eq!(host.model_fetch_count(), 1);
    }
}
