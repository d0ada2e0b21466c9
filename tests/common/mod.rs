//! Common test utilities: an in-memory page implementing the DOM traits.
//!
//! Links and headings share their mutable state through `Rc`, so a test can
//! keep a clone of a link and observe the classes the widget sets on it, or
//! move a heading to simulate a reflow.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use tocsync::dom::{
    FrameId, FrameRequester, HeadingElement, ScrollMode, ScrollViewport, TocDocument, TocLink,
};
use tocsync::{Result, TocError};

pub const ACTIVE: &str = "text-primary";

// ============================================================================
// Elements
// ============================================================================

#[derive(Debug, Clone)]
pub struct FakeLink {
    href: Option<String>,
    text: String,
    classes: Rc<RefCell<BTreeSet<String>>>,
}

impl FakeLink {
    pub fn new(href: &str, text: &str) -> Self {
        Self {
            href: Some(href.to_string()),
            text: text.to_string(),
            classes: Rc::default(),
        }
    }

    pub fn without_href(text: &str) -> Self {
        Self {
            href: None,
            ..Self::new("", text)
        }
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    pub fn is_active(&self) -> bool {
        self.classes.borrow().contains(ACTIVE)
    }
}

impl TocLink for FakeLink {
    fn href(&self) -> Option<String> {
        self.href.clone()
    }

    fn label(&self) -> String {
        self.text.clone()
    }

    fn set_class(&self, class: &str, enabled: bool) {
        let mut classes = self.classes.borrow_mut();
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }
}

#[derive(Debug, Clone)]
pub struct FakeHeading {
    text: String,
    top: Rc<Cell<f64>>,
}

impl FakeHeading {
    pub fn new(text: &str, top: f64) -> Self {
        Self {
            text: text.to_string(),
            top: Rc::new(Cell::new(top)),
        }
    }

    pub fn move_to(&self, top: f64) {
        self.top.set(top);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl HeadingElement for FakeHeading {
    fn heading_text(&self) -> String {
        self.text.clone()
    }

    fn document_top(&self) -> f64 {
        self.top.get()
    }
}

// ============================================================================
// Document
// ============================================================================

/// A page with an optional ToC container and a list of `h2`/`h3` headings.
#[derive(Debug, Default)]
pub struct FakeDocument {
    container_id: String,
    links: Option<Vec<FakeLink>>,
    ids: HashMap<String, FakeHeading>,
    headings: Vec<FakeHeading>,
    heading_queries: Cell<usize>,
}

impl FakeDocument {
    /// A page with the default container holding `links`.
    pub fn with_toc(links: &[FakeLink]) -> Self {
        Self {
            container_id: "table-of-contents-content".to_string(),
            links: Some(links.to_vec()),
            ..Self::default()
        }
    }

    /// A page without any ToC container.
    pub fn without_toc() -> Self {
        Self::default()
    }

    pub fn container_id(mut self, id: &str) -> Self {
        self.container_id = id.to_string();
        self
    }

    /// Heading carrying an `id` attribute.
    pub fn heading_with_id(mut self, id: &str, text: &str, top: f64) -> Self {
        let heading = FakeHeading::new(text, top);
        self.ids.insert(id.to_string(), heading.clone());
        self.headings.push(heading);
        self
    }

    /// Heading without an id, reachable only by its text.
    pub fn heading(mut self, text: &str, top: f64) -> Self {
        self.headings.push(FakeHeading::new(text, top));
        self
    }

    /// Non-heading element with an id (e.g. an anchor `<div>`).
    pub fn anchor(mut self, id: &str, top: f64) -> Self {
        self.ids.insert(id.to_string(), FakeHeading::new("", top));
        self
    }

    pub fn heading_queries(&self) -> usize {
        self.heading_queries.get()
    }

    pub fn find_heading(&self, text: &str) -> FakeHeading {
        self.headings
            .iter()
            .find(|h| h.text() == text)
            .cloned()
            .unwrap()
    }
}

impl TocDocument for FakeDocument {
    type Link = FakeLink;
    type Heading = FakeHeading;

    fn container_links(&self, container_id: &str, _link_selector: &str) -> Option<Vec<FakeLink>> {
        if container_id != self.container_id {
            return None;
        }
        self.links.clone()
    }

    fn element_by_id(&self, id: &str) -> Option<FakeHeading> {
        self.ids.get(id).cloned()
    }

    fn query_headings(&self, _selector: &str) -> Vec<FakeHeading> {
        self.heading_queries.set(self.heading_queries.get() + 1);
        self.headings.clone()
    }
}

/// Headings "Intro" (0), "Setup" (1000), "Usage" (2000) with matching links.
pub fn three_sections() -> (FakeDocument, Vec<FakeLink>) {
    let links = vec![
        FakeLink::new("#intro", "Intro"),
        FakeLink::new("#setup", "Setup"),
        FakeLink::new("#usage", "Usage"),
    ];
    let document = FakeDocument::with_toc(&links)
        .heading_with_id("intro", "Intro", 0.0)
        .heading_with_id("setup", "Setup", 1000.0)
        .heading_with_id("usage", "Usage", 2000.0);
    (document, links)
}

pub fn active_flags(links: &[FakeLink]) -> Vec<bool> {
    links.iter().map(FakeLink::is_active).collect()
}

// ============================================================================
// Viewport and frames
// ============================================================================

#[derive(Debug)]
pub struct FakeViewport {
    scroll_top: Cell<f64>,
    height: f64,
    scrolls: RefCell<Vec<(f64, ScrollMode)>>,
}

impl FakeViewport {
    pub fn new(scroll_top: f64, height: f64) -> Self {
        Self {
            scroll_top: Cell::new(scroll_top),
            height,
            scrolls: RefCell::default(),
        }
    }

    /// User scroll: moves the viewport without recording a request.
    pub fn set_scroll_top(&self, top: f64) {
        self.scroll_top.set(top);
    }

    pub fn scroll_requests(&self) -> Vec<(f64, ScrollMode)> {
        self.scrolls.borrow().clone()
    }
}

impl ScrollViewport for FakeViewport {
    fn scroll_top(&self) -> f64 {
        self.scroll_top.get()
    }

    fn viewport_height(&self) -> f64 {
        self.height
    }

    fn scroll_to(&self, top: f64, mode: ScrollMode) {
        // The animation is the browser's business; only record the request.
        self.scrolls.borrow_mut().push((top, mode));
    }
}

/// Collects frame requests so the test decides when frames run.
#[derive(Debug, Default)]
pub struct FakeFrames {
    requested: Cell<FrameId>,
    cancelled: RefCell<Vec<FrameId>>,
    unavailable: Cell<bool>,
}

impl FakeFrames {
    pub fn requested(&self) -> usize {
        usize::try_from(self.requested.get()).unwrap()
    }

    pub fn cancelled(&self) -> Vec<FrameId> {
        self.cancelled.borrow().clone()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }
}

impl FrameRequester for FakeFrames {
    fn request_frame(&self) -> Result<FrameId> {
        if self.unavailable.get() {
            return Err(TocError::Dom("requestAnimationFrame unavailable".into()));
        }
        let id = self.requested.get() + 1;
        self.requested.set(id);
        Ok(id)
    }

    fn cancel_frame(&self, id: FrameId) {
        self.cancelled.borrow_mut().push(id);
    }
}
