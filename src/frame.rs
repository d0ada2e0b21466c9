//! Coalesces scroll events into animation-frame recomputations.
//!
//! The scroll listener may fire many times between two repaints. Only the
//! first event of a burst requests a frame; the rest see the pending request
//! and return. The frame callback recomputes once and reopens the gate, so a
//! burst always ends with exactly one recomputation at its final position.

use crate::dom::{FrameId, FrameRequester};

/// Per-widget frame gate.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<FrameId>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame has been requested and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle one scroll event. Returns `true` if a frame was requested.
    ///
    /// If the request fails the gate stays open, so the next scroll event
    /// tries again.
    pub fn on_scroll<F: FrameRequester>(&mut self, frames: &F) -> bool {
        if self.pending.is_some() {
            return false;
        }
        match frames.request_frame() {
            Ok(id) => {
                self.pending = Some(id);
                true
            }
            Err(e) => {
                log::warn!("Could not schedule ToC update: {e}");
                false
            }
        }
    }

    /// Call from the frame callback after recomputing.
    pub fn frame_done(&mut self) {
        self.pending = None;
    }

    /// Cancel the outstanding frame, if any.
    pub fn cancel<F: FrameRequester>(&mut self, frames: &F) {
        if let Some(id) = self.pending.take() {
            frames.cancel_frame(id);
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::error::{Result, TocError};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Frames {
        next_id: Cell<FrameId>,
        fail: Cell<bool>,
        cancelled: RefCell<Vec<FrameId>>,
    }

    impl FrameRequester for Frames {
        fn request_frame(&self) -> Result<FrameId> {
            if self.fail.get() {
                return Err(TocError::Dom("rAF unavailable".into()));
            }
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            Ok(id)
        }

        fn cancel_frame(&self, id: FrameId) {
            self.cancelled.borrow_mut().push(id);
        }
    }

    #[test]
    fn test_burst_requests_one_frame() {
        let frames = Frames::default();
        let mut scheduler = FrameScheduler::new();
        let requested = (0..50).filter(|_| scheduler.on_scroll(&frames)).count();
        assert_eq!(requested, 1);
        assert_eq!(frames.next_id.get(), 1);
        assert!(scheduler.is_pending());
    }

    #[test]
    fn test_gate_reopens_after_frame() {
        let frames = Frames::default();
        let mut scheduler = FrameScheduler::new();
        assert!(scheduler.on_scroll(&frames));
        scheduler.frame_done();
        assert!(!scheduler.is_pending());
        assert!(scheduler.on_scroll(&frames));
        assert_eq!(frames.next_id.get(), 2);
    }

    #[test]
    fn test_failed_request_leaves_gate_open() {
        let frames = Frames::default();
        frames.fail.set(true);
        let mut scheduler = FrameScheduler::new();
        assert!(!scheduler.on_scroll(&frames));
        assert!(!scheduler.is_pending());

        frames.fail.set(false);
        assert!(scheduler.on_scroll(&frames));
    }

    #[test]
    fn test_cancel_drops_pending_frame() {
        let frames = Frames::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.on_scroll(&frames);
        scheduler.cancel(&frames);
        scheduler.cancel(&frames);
        assert_eq!(*frames.cancelled.borrow(), vec![1]);
        assert!(!scheduler.is_pending());
    }
}
