//! The ToC widget: resolver, tracker, scroll controller and frame gate
//! wired together.
//!
//! [`TocWidget`] is the platform-independent core and owns all widget state.
//! On wasm32, [`TocSync`] wraps it with the browser listeners and is the type
//! exported to JavaScript.

#[cfg(target_arch = "wasm32")]
mod bindings;

#[cfg(target_arch = "wasm32")]
pub use bindings::{init_table_of_contents, TocSync};
#[cfg(all(target_arch = "wasm32", feature = "auto-init"))]
pub(crate) use bindings::mount_when_ready;

use serde::Serialize;

use crate::config::TocConfig;
use crate::dom::{FrameRequester, HeadingElement, ScrollViewport, TocDocument, TocLink};
use crate::error::Result;
use crate::frame::FrameScheduler;
use crate::resolver::{trim_text, HeadingEntry, HeadingResolver};
use crate::scroll::ScrollController;
use crate::tracker::ActiveSectionTracker;

/// Point-in-time view of a widget, for debugging and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocSnapshot {
    pub active_index: Option<usize>,
    pub active_class: String,
    pub entries: Vec<EntrySnapshot>,
}

/// One tracked link as seen in a [`TocSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySnapshot {
    pub id: String,
    pub label: String,
    /// Document-relative top of the heading.
    pub top: f64,
    /// Whether the link currently carries the active class.
    pub active: bool,
}

/// A mounted table of contents.
pub struct TocWidget<L, H> {
    entries: Vec<HeadingEntry<L, H>>,
    tracker: ActiveSectionTracker,
    scroller: ScrollController,
    scheduler: FrameScheduler,
    stopped: bool,
}

impl<L, H> TocWidget<L, H>
where
    L: TocLink,
    H: HeadingElement + Clone,
{
    /// Resolve the ToC in `document`.
    ///
    /// No class is touched until [`start`](Self::start).
    ///
    /// # Errors
    /// [`TocError::Config`](crate::TocError::Config) for invalid options, or
    /// one of the "nothing to track" variants (see
    /// [`TocError::is_nothing_to_track`](crate::TocError::is_nothing_to_track)).
    pub fn build<D>(document: &D, config: &TocConfig) -> Result<Self>
    where
        D: TocDocument<Link = L, Heading = H>,
    {
        config.validate()?;
        let entries = HeadingResolver::new(config).resolve(document)?;
        Ok(Self {
            entries,
            tracker: ActiveSectionTracker::new(config),
            scroller: ScrollController::new(config),
            scheduler: FrameScheduler::new(),
            stopped: false,
        })
    }

    /// Mark the section in view before the first scroll event.
    pub fn start<V: ScrollViewport>(&mut self, viewport: &V) -> Option<usize> {
        self.recompute(viewport)
    }

    pub fn entries(&self) -> &[HeadingEntry<L, H>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.tracker.active()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.tracker
            .active()
            .and_then(|i| self.entries.get(i))
            .map(|entry| entry.id.as_str())
    }

    pub fn heading(&self, index: usize) -> Option<&H> {
        self.entries.get(index).map(|entry| &entry.element)
    }

    pub fn scroller(&self) -> ScrollController {
        self.scroller
    }

    pub fn is_frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Whether [`shutdown`](Self::shutdown) has run.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Recompute and restyle right now, outside the frame gate.
    ///
    /// After [`shutdown`](Self::shutdown) the links are left alone.
    pub fn recompute<V: ScrollViewport>(&mut self, viewport: &V) -> Option<usize> {
        if self.stopped {
            return None;
        }
        self.tracker.update(&self.entries, viewport)
    }

    /// Scroll listener body. Returns `true` if a frame was requested.
    pub fn on_scroll<F: FrameRequester>(&mut self, frames: &F) -> bool {
        !self.stopped && self.scheduler.on_scroll(frames)
    }

    /// Animation-frame callback body.
    pub fn on_frame<V: ScrollViewport>(&mut self, viewport: &V) -> Option<usize> {
        let active = self.recompute(viewport);
        self.scheduler.frame_done();
        active
    }

    /// Click handler body for the link at `index`; the caller has already
    /// suppressed the default navigation. Returns the scroll target.
    pub fn activate<V: ScrollViewport>(&self, index: usize, viewport: &V) -> Option<f64> {
        let heading = self.heading(index)?;
        Some(self.scroller.scroll_to_heading(heading, viewport))
    }

    /// Cancel any pending frame and remove the active class everywhere.
    pub fn shutdown<F: FrameRequester>(&mut self, frames: &F) {
        self.stopped = true;
        self.scheduler.cancel(frames);
        self.tracker.clear(&self.entries);
    }

    pub fn snapshot(&self) -> TocSnapshot {
        let class = self.tracker.active_class();
        TocSnapshot {
            active_index: self.tracker.active(),
            active_class: class.to_string(),
            entries: self
                .entries
                .iter()
                .map(|entry| EntrySnapshot {
                    id: entry.id.clone(),
                    label: trim_text(&entry.link.label()).to_string(),
                    top: entry.element.document_top(),
                    active: entry.link.has_class(class),
                })
                .collect(),
        }
    }
}
