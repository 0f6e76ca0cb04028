//! Handoff from composed payloads to a page-rendering layer.
//!
//! The bridge owns the composition context and mode chosen for a request
//! and turns any [`Flattenable`] source into either a props map, a [`Page`]
//! or a JSON document. Deferred values are passed through for the renderer
//! to evaluate.

use serde::Serialize;

use crate::{ComposeContext, ComposeMode, ComposeResult, Flattenable, Props};

/// A component name with the props it is rendered with.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page {
    /// Component identifier understood by the renderer.
    pub component: String,
    /// Composed props.
    pub props: Props,
}

/// The host page-render call.
pub trait PageRenderer {
    /// Rendered response.
    type Output;
    /// Rendering failure; composition failures convert into it.
    type Error: From<crate::ComposeError>;

    /// Render `page`.
    ///
    /// # Errors
    ///
    /// Implementation defined.
    fn render(&self, page: Page) -> Result<Self::Output, Self::Error>;
}

/// Adapts providers and collections to the shape a renderer expects.
///
/// ```rust
/// use page_props::bridge::RenderBridge;
/// use page_props::{ComposeContext, props};
/// use serde_json::json;
///
/// let bridge = RenderBridge::new(ComposeContext::new());
/// let page = bridge.page("Dashboard", &props! { "title" => "Hi" })?;
/// assert_eq!(page.component, "Dashboard");
/// assert_eq!(
///     serde_json::to_value(&page)?,
///     json!({"component": "Dashboard", "props": {"title": "Hi"}})
/// );
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct RenderBridge {
    context: ComposeContext,
    mode: ComposeMode,
}

impl RenderBridge {
    /// Bridge composing in [`ComposeMode::Flat`].
    #[must_use]
    pub fn new(context: ComposeContext) -> Self {
        Self {
            context,
            mode: ComposeMode::Flat,
        }
    }

    /// Select the composition mode used for props.
    #[must_use]
    pub const fn with_mode(mut self, mode: ComposeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Composition context.
    #[must_use]
    pub const fn context(&self) -> &ComposeContext {
        &self.context
    }

    /// Composition mode.
    #[must_use]
    pub const fn mode(&self) -> ComposeMode {
        self.mode
    }

    /// Compose `source` into a props map.
    ///
    /// # Errors
    ///
    /// Propagates composition failures.
    pub fn props(&self, source: &dyn Flattenable) -> ComposeResult<Props> {
        source.compose(&self.context, self.mode)
    }

    /// Compose `source` into a [`Page`] for `component`.
    ///
    /// # Errors
    ///
    /// Propagates composition failures.
    pub fn page(&self, component: impl Into<String>, source: &dyn Flattenable) -> ComposeResult<Page> {
        Ok(Page {
            component: component.into(),
            props: self.props(source)?,
        })
    }

    /// Compose `source` for a JSON API response.
    ///
    /// Always composes in nested mode so the result holds no provider
    /// handles; deferred values appear as stand-ins.
    ///
    /// # Errors
    ///
    /// Propagates composition and serialisation failures.
    pub fn json(&self, source: &dyn Flattenable) -> ComposeResult<serde_json::Value> {
        source.to_nested_map(&self.context)?.to_json()
    }

    /// Compose `source` and hand the page to `renderer`.
    ///
    /// # Errors
    ///
    /// Returns composition failures converted into the renderer's error, or
    /// the renderer's own failure.
    pub fn render<R: PageRenderer>(
        &self,
        renderer: &R,
        component: impl Into<String>,
        source: &dyn Flattenable,
    ) -> Result<R::Output, R::Error> {
        let page = self.page(component, source)?;
        renderer.render(page)
    }
}
