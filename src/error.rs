//! Error types surfaced by template tag evaluation.
//!
//! Every fallible operation in this crate returns [`TagError`]. The display
//! strings are user-facing: the host shows them verbatim inside the template
//! editor, so they name the exact document id or URL that failed to resolve.

use thiserror::Error;

/// Error raised while resolving a template tag.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TagError {
    /// The context named a workspace id that no longer exists in the host.
    #[error("Workspace not found for {workspace_id}")]
    WorkspaceNotFound { workspace_id: String },

    /// The context named a request id that no longer exists in the host.
    #[error("Request not found for {request_id}")]
    RequestNotFound { request_id: String },

    /// The jar holds no cookie applicable to the target URL.
    #[error("No cookies in store for url \"{url}\"")]
    NoCookiesInStore { url: String },

    /// Cookies matched the URL, but none carried the requested name.
    /// The message lists every matching name so the user can correct theirs.
    #[error(
        "No cookie with name \"{name}\".\nChoices are [\n\t{}\n] for url \"{url}\"",
        quote_choices(.choices)
    )]
    CookieNotFound {
        name: String,
        url: String,
        choices: Vec<String>,
    },

    /// A host model lookup failed for reasons other than a missing document.
    #[error("Host data access failed: {message}")]
    Host { message: String },

    /// The host's template renderer rejected an expression.
    #[error("Failed to render: {message}")]
    Render { message: String },
}

impl TagError {
    /// Create a host data access error.
    pub fn host(message: impl Into<String>) -> Self {
        TagError::Host {
            message: message.into(),
        }
    }

    /// Create a render failure error.
    pub fn render(message: impl Into<String>) -> Self {
        TagError::Render {
            message: message.into(),
        }
    }
}

fn quote_choices(choices: &[String]) -> String {
    choices
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(",\n\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_carry_ids() {
        let err = TagError::WorkspaceNotFound {
            workspace_id: "wrk_123".to_string(),
        };
        assert_eq!(err.to_string(), "Workspace not found for wrk_123");

        let err = TagError::RequestNotFound {
            request_id: "req_456".to_string(),
        };
        assert_eq!(err.to_string(), "Request not found for req_456");
    }

    #[test]
    fn test_empty_store_message_quotes_url() {
        let err = TagError::NoCookiesInStore {
            url: "http://example.com/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No cookies in store for url \"http://example.com/\""
        );
    }

    #[test]
    fn test_cookie_not_found_lists_quoted_choices() {
        let err = TagError::CookieNotFound {
            name: "missing".to_string(),
            url: "http://example.com/".to_string(),
            choices: vec!["session".to_string(), "csrf".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "No cookie with name \"missing\".\nChoices are [\n\t\"session\",\n\t\"csrf\"\n] for url \"http://example.com/\""
        );
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            TagError::render("bad expression").to_string(),
            "Failed to render: bad expression"
        );
        assert_eq!(
            TagError::host("storage offline").to_string(),
            "Host data access failed: storage offline"
        );
    }
}
