//! Browser glue for [`TocWidget`]: listeners, animation frames, mounting.
//!
//! Listener closures hold a `Weak` to the shared state so a pending frame or
//! a late click after `destroy()` finds nothing and returns.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Event, MouseEvent, Window};

use super::TocWidget;
use crate::config::TocConfig;
use crate::dom::web::{WebDocument, WebFrames, WebViewport};
use crate::error::{Result, TocError};

type WebWidget = TocWidget<Element, Element>;

struct SharedState {
    widget: WebWidget,
    viewport: WebViewport,
}

/// Explicit entry -> handler association: the closure knows its entry by
/// index and looks the heading up in the shared state when clicked.
struct ClickHandler {
    link: Element,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

thread_local! {
    /// Widgets mounted by [`init_table_of_contents`], alive for the page.
    static MOUNTED: RefCell<Vec<TocSync>> = const { RefCell::new(Vec::new()) };
}

/// A table of contents kept in sync with the page scroll position.
///
/// Listeners are removed when the widget is destroyed or freed.
#[wasm_bindgen]
pub struct TocSync {
    state: Rc<RefCell<SharedState>>,
    container_id: String,
    window: Window,
    frames: WebFrames,
    #[allow(dead_code)] // Kept alive for `frames`
    frame_closure: Closure<dyn FnMut()>,
    scroll_closure: Option<Closure<dyn FnMut(Event)>>,
    click_handlers: Vec<ClickHandler>,
}

impl TocSync {
    /// Resolve the ToC, mark the current section and register listeners.
    ///
    /// The caller must ensure the document is parsed.
    ///
    /// # Errors
    /// Any [`TocError`]; see [`TocError::is_nothing_to_track`] for the
    /// benign ones.
    pub fn attach(config: &TocConfig) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| TocError::Dom("no window".into()))?;
        let document =
            WebDocument::from_window().ok_or_else(|| TocError::Dom("no document".into()))?;
        let viewport = WebViewport::new(window.clone());

        let mut widget = TocWidget::build(&document, config)?;
        widget.start(&viewport);
        let state = Rc::new(RefCell::new(SharedState {
            widget,
            viewport: viewport.clone(),
        }));

        let weak_state = Rc::downgrade(&state);
        let frame_closure = Closure::wrap(Box::new(move || {
            if let Some(state) = weak_state.upgrade() {
                let mut guard = state.borrow_mut();
                let s = &mut *guard;
                s.widget.on_frame(&s.viewport);
            }
        }) as Box<dyn FnMut()>);
        let frame_callback: &Function = frame_closure.as_ref().unchecked_ref();
        let frames = WebFrames::new(window.clone(), frame_callback.clone());

        // Listeners registered below are removed by Drop if a later step fails.
        let mut sync = Self {
            state,
            container_id: config.container_id.clone(),
            window,
            frames,
            frame_closure,
            scroll_closure: None,
            click_handlers: Vec::new(),
        };
        sync.listen_scroll()?;
        sync.listen_clicks(&viewport)?;
        log::debug!(
            "Mounted ToC #{} with {} entries",
            sync.container_id,
            sync.click_handlers.len()
        );
        Ok(sync)
    }

    fn listen_scroll(&mut self) -> Result<()> {
        let weak_state = Rc::downgrade(&self.state);
        let frames = self.frames.clone();
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            if let Some(state) = weak_state.upgrade() {
                state.borrow_mut().widget.on_scroll(&frames);
            }
        }) as Box<dyn FnMut(Event)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        self.window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
        self.scroll_closure = Some(closure);
        Ok(())
    }

    fn listen_clicks(&mut self, viewport: &WebViewport) -> Result<()> {
        let links: Vec<Element> = self
            .state
            .borrow()
            .widget
            .entries()
            .iter()
            .map(|entry| entry.link.clone())
            .collect();

        for (index, link) in links.into_iter().enumerate() {
            let weak_state = Rc::downgrade(&self.state);
            let viewport = viewport.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                event.prevent_default();
                let Some(state) = weak_state.upgrade() else {
                    return;
                };
                // Release the borrow before scrolling; scrollTo can dispatch
                // scroll synchronously in some engines.
                let target = {
                    let s = state.borrow();
                    s.widget
                        .heading(index)
                        .cloned()
                        .map(|heading| (heading, s.widget.scroller()))
                };
                if let Some((heading, scroller)) = target {
                    scroller.scroll_to_heading(&heading, &viewport);
                }
            }) as Box<dyn FnMut(MouseEvent)>);

            link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            self.click_handlers.push(ClickHandler { link, closure });
        }
        Ok(())
    }

    fn detach(&mut self) {
        if let Some(closure) = self.scroll_closure.take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to remove scroll listener: {e:?}");
            }
        }
        for handler in self.click_handlers.drain(..) {
            if let Err(e) = handler.link.remove_event_listener_with_callback(
                "click",
                handler.closure.as_ref().unchecked_ref(),
            ) {
                log::warn!("Failed to remove click listener: {e:?}");
            }
        }
        if let Ok(mut s) = self.state.try_borrow_mut() {
            s.widget.shutdown(&self.frames);
        }
    }
}

impl Drop for TocSync {
    fn drop(&mut self) {
        self.detach();
    }
}

#[wasm_bindgen]
impl TocSync {
    /// Mount on the current document with `options` (or the defaults).
    ///
    /// Returns `undefined` when the page has no usable table of contents.
    ///
    /// # Errors
    /// Throws on invalid options or if listener registration fails.
    pub fn mount(options: JsValue) -> std::result::Result<Option<TocSync>, JsValue> {
        let config = TocConfig::from_js(options)?;
        match Self::attach(&config) {
            Ok(sync) => Ok(Some(sync)),
            Err(e) if e.is_nothing_to_track() => {
                log::debug!("ToC widget not mounted: {e}");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Number of tracked links.
    pub fn len(&self) -> usize {
        self.state.borrow().widget.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().widget.is_empty()
    }

    #[wasm_bindgen(js_name = activeIndex)]
    pub fn active_index(&self) -> Option<u32> {
        self.state
            .borrow()
            .widget
            .active_index()
            .and_then(|i| u32::try_from(i).ok())
    }

    #[wasm_bindgen(js_name = activeId)]
    pub fn active_id(&self) -> Option<String> {
        self.state.borrow().widget.active_id().map(str::to_string)
    }

    /// Recompute the active link immediately. Does nothing once destroyed.
    pub fn refresh(&self) -> Option<u32> {
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        s.widget
            .recompute(&s.viewport)
            .and_then(|i| u32::try_from(i).ok())
    }

    /// Entries, heading positions and marker state as a plain object.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn snapshot(&self) -> std::result::Result<JsValue, JsValue> {
        let snapshot = self.state.borrow().widget.snapshot();
        serde_wasm_bindgen::to_value(&snapshot)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Remove all listeners and the active class. Later `refresh()` calls
    /// leave the links untouched.
    pub fn destroy(&mut self) {
        self.detach();
    }
}

/// Take the widgets registered for `container_id` out of the registry.
fn unregister(container_id: &str) -> Vec<TocSync> {
    MOUNTED.with(|mounted| {
        let mut mounted = mounted.borrow_mut();
        let (replaced, kept): (Vec<_>, Vec<_>) = mounted
            .drain(..)
            .partition(|existing| existing.container_id == container_id);
        *mounted = kept;
        replaced
    })
}

fn mount_and_keep(config: &TocConfig) {
    // The earlier widget shares the links; its teardown clears their classes,
    // so it must be gone before the new widget marks the current section.
    drop(unregister(&config.container_id));
    match TocSync::attach(config) {
        Ok(sync) => MOUNTED.with(|mounted| mounted.borrow_mut().push(sync)),
        Err(e) if e.is_nothing_to_track() => log::debug!("ToC widget not mounted: {e}"),
        Err(e) => log::warn!("ToC widget failed to mount: {e}"),
    }
}

/// Mount with `config` once the document is parsed: immediately if it
/// already is, otherwise on `DOMContentLoaded`.
pub(crate) fn mount_when_ready(config: TocConfig) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let callback = Closure::once_into_js(move || mount_and_keep(&config));
        if let Err(e) =
            document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        {
            log::warn!("Failed to defer ToC initialization: {e:?}");
        }
    } else {
        mount_and_keep(&config);
    }
}

/// Mount a table of contents with custom options once the DOM is ready.
///
/// The widget lives for the rest of the page; calling again for the same
/// container replaces it.
///
/// # Errors
/// Throws if `options` is not a valid configuration object.
#[wasm_bindgen(js_name = initTableOfContents)]
pub fn init_table_of_contents(options: JsValue) -> std::result::Result<(), JsValue> {
    let config = TocConfig::from_js(options)?;
    mount_when_ready(config);
    Ok(())
}
