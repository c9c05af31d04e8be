//! The cookie tag's resolution sequence.
//!
//! [`resolve_cookie_value`] is the whole behavior of the tag in one place:
//! decide the target URL (explicit, or built from the current request),
//! fetch the workspace's jar, and look the cookie up by name. The tag
//! surface in [`crate::tag`] is a thin adapter over this module.

use crate::cookies::lookup::lookup_cookie_value;
use crate::error::TagError;
use crate::host::TagContext;
use crate::models::{Request, RequestParameter};
use crate::urlbuild::{build_query_string, join_url_and_query_string, smart_encode_url};

/// Resolve the decoded value of `cookie_name` for the current evaluation.
///
/// Returns `Ok(None)` without touching the host when the context carries no
/// request/workspace ids; anything else is a real answer or a [`TagError`].
///
/// With `from_jar` true the lookup runs against `url` exactly as given; the
/// text is not rendered, so a URL containing template expressions matches
/// nothing and reports an empty store for that literal text. With `from_jar`
/// false the target URL is built from the current request via
/// [`build_request_url`], which does render.
pub async fn resolve_cookie_value(
    ctx: &TagContext,
    from_jar: bool,
    cookie_name: &str,
    url: Option<&str>,
) -> Result<Option<String>, TagError> {
    let (request_id, workspace_id) = match ctx.meta().ids() {
        Some(ids) => ids,
        None => return Ok(None),
    };

    tracing::debug!(
        request_id = %request_id,
        workspace_id = %workspace_id,
        from_jar,
        "resolving cookie value"
    );

    let workspace = match ctx.models().workspace_by_id(workspace_id).await? {
        Some(workspace) => workspace,
        None => {
            return Err(TagError::WorkspaceNotFound {
                workspace_id: workspace_id.to_string(),
            })
        }
    };

    let jar = ctx.models().cookie_jar_for_workspace(&workspace).await?;

    let target_url = if from_jar {
        url.unwrap_or_default().to_string()
    } else {
        let request = match ctx.models().request_by_id(request_id).await? {
            Some(request) => request,
            None => {
                return Err(TagError::RequestNotFound {
                    request_id: request_id.to_string(),
                })
            }
        };
        build_request_url(ctx, &request).await?
    };

    lookup_cookie_value(&jar.cookies, &target_url, cookie_name).map(Some)
}

/// Build the request's effective URL the way the host would send it.
///
/// The URL and every parameter name/value are rendered first, then the
/// parameters become a query string, the query is joined on, and the result
/// goes through smart encoding under the request's own encode toggle.
pub async fn build_request_url(ctx: &TagContext, request: &Request) -> Result<String, TagError> {
    let url = ctx.render(&request.url).await?;

    let mut rendered = Vec::with_capacity(request.parameters.len());
    for parameter in &request.parameters {
        rendered.push(RequestParameter {
            name: ctx.render(&parameter.name).await?,
            value: ctx.render(&parameter.value).await?,
        });
    }

    let query = build_query_string(&rendered);
    let joined = join_url_and_query_string(&url, &query);
    let finished = smart_encode_url(&joined, request.setting_encode_url);

    tracing::debug!(url = %finished, "built request url");
    Ok(finished)
}
