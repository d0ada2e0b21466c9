//! `web_sys` implementations of the DOM traits.

use js_sys::Function;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList, ScrollBehavior, ScrollToOptions, Window};

use super::{
    FrameId, FrameRequester, HeadingElement, ScrollMode, ScrollViewport, TocDocument, TocLink,
};
use crate::error::{Result, TocError};

/// `window.pageYOffset || document.documentElement.scrollTop`
pub(crate) fn page_scroll_top(window: &Window) -> f64 {
    let offset = window.page_y_offset().unwrap_or(0.0);
    if offset > 0.0 {
        return offset;
    }
    window
        .document()
        .and_then(|document| document.document_element())
        .map_or(0.0, |root| f64::from(root.scroll_top()))
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl TocLink for Element {
    fn href(&self) -> Option<String> {
        self.get_attribute("href")
    }

    fn label(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_class(&self, class: &str, enabled: bool) {
        let classes = self.class_list();
        let result = if enabled {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle class {class:?}: {e:?}");
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }
}

impl HeadingElement for Element {
    fn heading_text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn document_top(&self) -> f64 {
        let scroll_top = web_sys::window().map_or(0.0, |window| page_scroll_top(&window));
        self.get_bounding_client_rect().top() + scroll_top
    }
}

/// The live page document.
#[derive(Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// `window.document`, if running in a page.
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document))
    }
}

impl TocDocument for WebDocument {
    type Link = Element;
    type Heading = Element;

    fn container_links(&self, container_id: &str, link_selector: &str) -> Option<Vec<Element>> {
        let container = self.document.get_element_by_id(container_id)?;
        match container.query_selector_all(link_selector) {
            Ok(list) => Some(elements(&list)),
            Err(e) => {
                log::warn!("Invalid link selector {link_selector:?}: {e:?}");
                Some(Vec::new())
            }
        }
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        // getElementById, not querySelector: ids may contain selector syntax
        self.document.get_element_by_id(id)
    }

    fn query_headings(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(e) => {
                log::warn!("Invalid heading selector {selector:?}: {e:?}");
                Vec::new()
            }
        }
    }
}

/// The browser window as the scrolling viewport.
#[derive(Clone)]
pub struct WebViewport {
    window: Window,
}

impl WebViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ScrollViewport for WebViewport {
    fn scroll_top(&self) -> f64 {
        page_scroll_top(&self.window)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64, mode: ScrollMode) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match mode {
            ScrollMode::Smooth => ScrollBehavior::Smooth,
            ScrollMode::Instant => ScrollBehavior::Auto,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// `requestAnimationFrame` with a fixed callback.
#[derive(Clone)]
pub struct WebFrames {
    window: Window,
    callback: Function,
}

impl WebFrames {
    /// `callback` must stay alive (its `Closure` owned elsewhere) for as
    /// long as frames can be requested.
    pub fn new(window: Window, callback: Function) -> Self {
        Self { window, callback }
    }
}

impl FrameRequester for WebFrames {
    fn request_frame(&self) -> Result<FrameId> {
        self.window
            .request_animation_frame(&self.callback)
            .map_err(TocError::from)
    }

    fn cancel_frame(&self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id) {
            log::warn!("cancelAnimationFrame({id}) failed: {e:?}");
        }
    }
}
