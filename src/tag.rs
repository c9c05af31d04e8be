//! Template tag surface: declarations, argument values, and the registry.
//!
//! A [`TemplateTag`] describes itself to the host through a
//! [`TagDefinition`] (name, editor labels, argument specs) and executes
//! through [`run`](TemplateTag::run), which takes the owned context and
//! argument values so the returned future is `'static`. The one built-in
//! tag is [`CookieDecodeTag`]; [`TagRegistry`] is what a host embeds to
//! look tags up by name.

use crate::error::TagError;
use crate::host::TagContext;
use crate::resolver::resolve_cookie_value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Alias for the `Future` type returned by a tag run.
pub type TagFuture = Pin<Box<dyn Future<Output = Result<Option<String>, TagError>> + Send>>;

/// Predicate deciding whether an argument is hidden given the current
/// argument values. Plain function pointer so specs stay `Clone` + `Debug`.
pub type HidePredicate = fn(&[TagArgValue]) -> bool;

/// The kind of editor control an argument renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A checkbox with a declared default.
    Boolean { default_value: bool },
    /// A free-text input.
    Text,
}

/// Declaration of one tag argument.
#[derive(Debug, Clone)]
pub struct TagArgSpec {
    /// Label shown in the tag editor.
    pub display_name: String,
    pub kind: ArgKind,
    /// When set, the editor hides this argument for matching values.
    pub hide: Option<HidePredicate>,
}

impl TagArgSpec {
    /// Creates a boolean argument.
    #[must_use]
    pub fn boolean(display_name: impl Into<String>, default_value: bool) -> Self {
        Self {
            display_name: display_name.into(),
            kind: ArgKind::Boolean { default_value },
            hide: None,
        }
    }

    /// Creates a text argument.
    #[must_use]
    pub fn text(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            kind: ArgKind::Text,
            hide: None,
        }
    }

    /// Sets the hide predicate.
    #[must_use]
    pub fn hidden_when(mut self, predicate: HidePredicate) -> Self {
        self.hide = Some(predicate);
        self
    }

    /// Evaluates the hide predicate against the current values.
    #[must_use]
    pub fn is_hidden(&self, values: &[TagArgValue]) -> bool {
        self.hide.map_or(false, |hide| hide(values))
    }
}

/// Everything the host needs to present a tag in its editor.
#[derive(Debug, Clone)]
pub struct TagDefinition {
    /// Identifier used inside templates.
    pub name: String,
    /// Label shown in the tag picker.
    pub display_name: String,
    pub description: String,
    pub args: Vec<TagArgSpec>,
}

impl TagDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: String::new(),
            description: String::new(),
            args: Vec::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends an argument spec.
    #[must_use]
    pub fn with_arg(mut self, arg: TagArgSpec) -> Self {
        self.args.push(arg);
        self
    }
}

/// A concrete argument value supplied at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagArgValue {
    Bool(bool),
    Text(String),
}

impl TagArgValue {
    /// Truthiness the way template editors treat values: `false` and the
    /// empty string are falsy, everything else is truthy.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            TagArgValue::Bool(value) => *value,
            TagArgValue::Text(text) => !text.is_empty(),
        }
    }

    /// The text content, or `None` for booleans.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagArgValue::Text(text) => Some(text),
            TagArgValue::Bool(_) => None,
        }
    }
}

impl From<bool> for TagArgValue {
    fn from(value: bool) -> Self {
        TagArgValue::Bool(value)
    }
}

impl From<&str> for TagArgValue {
    fn from(value: &str) -> Self {
        TagArgValue::Text(value.to_string())
    }
}

impl From<String> for TagArgValue {
    fn from(value: String) -> Self {
        TagArgValue::Text(value)
    }
}

/// Trait for template tags a host can embed.
///
/// Implementations must be thread-safe. `run` takes the context and values
/// by ownership so the boxed future borrows nothing.
pub trait TemplateTag: Send + Sync {
    /// Returns the tag's declaration.
    fn definition(&self) -> TagDefinition;

    /// Evaluates the tag. `Ok(None)` means "no value" rather than failure;
    /// hosts typically render it as an empty string.
    fn run(&self, ctx: TagContext, args: Vec<TagArgValue>) -> TagFuture;
}

/// The `cookieDecode` tag: resolve a cookie's decoded value from the
/// workspace's cookie jar, targeting either an explicit URL or the URL the
/// current request would be sent to.
#[derive(Debug, Default, Clone, Copy)]
pub struct CookieDecodeTag;

impl CookieDecodeTag {
    /// Name the tag is invoked by inside templates.
    pub const NAME: &'static str = "cookieDecode";
}

impl TemplateTag for CookieDecodeTag {
    fn definition(&self) -> TagDefinition {
        TagDefinition::new(Self::NAME)
            .with_display_name("Cookie Decode")
            .with_description("Decode cookie value from the cookie jar or the current request")
            .with_arg(TagArgSpec::boolean("From Cookie Jar", true))
            .with_arg(TagArgSpec::text("Cookie Name"))
            .with_arg(
                // The URL field only applies when reading straight from
                // the jar, so it disappears when the toggle is off.
                TagArgSpec::text("Cookie Url")
                    .hidden_when(|values| !values.first().map_or(false, TagArgValue::truthy)),
            )
    }

    fn run(&self, ctx: TagContext, args: Vec<TagArgValue>) -> TagFuture {
        let from_jar = args.first().map_or(true, TagArgValue::truthy);
        let cookie_name = args
            .get(1)
            .and_then(TagArgValue::as_text)
            .unwrap_or_default()
            .to_string();
        let url = args
            .get(2)
            .and_then(TagArgValue::as_text)
            .map(str::to_string);

        Box::pin(async move {
            resolve_cookie_value(&ctx, from_jar, &cookie_name, url.as_deref()).await
        })
    }
}

/// Name-keyed registry of the tags a host exposes to its templates.
#[derive(Default)]
pub struct TagRegistry {
    tags: HashMap<String, Arc<dyn TemplateTag>>,
}

impl TagRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in tag registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CookieDecodeTag));
        registry
    }

    /// Registers a tag under its declared name, replacing any previous tag
    /// with that name.
    pub fn register(&mut self, tag: Arc<dyn TemplateTag>) {
        self.tags.insert(tag.definition().name, tag);
    }

    /// Gets a tag by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn TemplateTag>> {
        self.tags.get(name)
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Lists registered tag names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tags.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry")
            .field("names", &self.names())
            .finish()
    }
}
