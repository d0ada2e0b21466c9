//! The slice of the DOM the widget reads and writes.
//!
//! Resolution, tracking and scheduling are written against these traits so
//! they run unchanged in the browser (`web` module, wasm32 only) and against
//! in-memory documents in native tests.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::error::Result;

/// Handle returned by [`FrameRequester::request_frame`], usable for
/// cancellation (`requestAnimationFrame` id in the browser).
pub type FrameId = i32;

/// How a link-triggered scroll moves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// Browser-animated scroll (`behavior: "smooth"`).
    #[default]
    Smooth,
    /// Immediate jump (`behavior: "auto"`).
    Instant,
}

/// A navigation anchor inside the ToC container.
pub trait TocLink {
    /// Raw `href` attribute, e.g. `#getting-started`.
    fn href(&self) -> Option<String>;
    /// Text content of the anchor, untrimmed.
    fn label(&self) -> String;
    /// Add or remove a class on the anchor.
    fn set_class(&self, class: &str, enabled: bool);
    fn has_class(&self, class: &str) -> bool;
}

/// A heading element in the document body.
pub trait HeadingElement {
    /// Text content of the heading, untrimmed.
    fn heading_text(&self) -> String;
    /// Top edge relative to the document origin (not the viewport).
    fn document_top(&self) -> f64;
}

/// Lookup operations against the whole document.
pub trait TocDocument {
    type Link: TocLink;
    type Heading: HeadingElement + Clone;

    /// Links under the element with id `container_id` matching
    /// `link_selector`, in tree order. `None` when the container is absent.
    fn container_links(
        &self,
        container_id: &str,
        link_selector: &str,
    ) -> Option<Vec<Self::Link>>;

    /// `document.getElementById`.
    fn element_by_id(&self, id: &str) -> Option<Self::Heading>;

    /// All elements matching `selector`, in tree order.
    fn query_headings(&self, selector: &str) -> Vec<Self::Heading>;
}

/// The scrolling viewport (the window, in the browser).
pub trait ScrollViewport {
    /// Current vertical scroll offset.
    fn scroll_top(&self) -> f64;
    /// Visible viewport height.
    fn viewport_height(&self) -> f64;
    /// Start scrolling the viewport to `top`; returns immediately.
    fn scroll_to(&self, top: f64, mode: ScrollMode);
}

/// Schedules a callback for the next rendering frame.
pub trait FrameRequester {
    /// Request one callback before the next repaint.
    ///
    /// # Errors
    /// Returns an error if the host refused the request.
    fn request_frame(&self) -> Result<FrameId>;

    /// Drop a pending request. Unknown ids are ignored.
    fn cancel_frame(&self, id: FrameId);
}
