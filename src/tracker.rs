//! Active-section tracking.
//!
//! The current section is the last heading, in ToC order, whose top edge has
//! scrolled above a threshold line one third of the way down the viewport.

use crate::config::TocConfig;
use crate::dom::{HeadingElement, ScrollViewport, TocLink};
use crate::resolver::HeadingEntry;

/// Index of the last reached heading.
///
/// `tops` are document-relative heading tops in ToC order. A heading is
/// reached when its top is `<= threshold`; the walk stops at the first one
/// that is not, so later tops are never evaluated.
pub fn active_index<I>(tops: I, threshold: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    tops.into_iter()
        .take_while(|top| *top <= threshold)
        .enumerate()
        .last()
        .map(|(index, _)| index)
}

/// Decides which link is active and keeps the link classes in sync.
#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    active_class: String,
    activation_divisor: f64,
    active: Option<usize>,
}

impl ActiveSectionTracker {
    pub fn new(config: &TocConfig) -> Self {
        Self {
            active_class: config.active_class.clone(),
            activation_divisor: config.activation_divisor,
            active: None,
        }
    }

    /// Index marked active by the last [`update`](Self::update).
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_class(&self) -> &str {
        &self.active_class
    }

    /// Document offset a heading must reach to become current.
    pub fn threshold(&self, scroll_top: f64, viewport_height: f64) -> f64 {
        scroll_top + viewport_height / self.activation_divisor
    }

    /// Recompute the active entry from the viewport and restyle the links.
    pub fn update<L, H, V>(
        &mut self,
        entries: &[HeadingEntry<L, H>],
        viewport: &V,
    ) -> Option<usize>
    where
        L: TocLink,
        H: HeadingElement,
        V: ScrollViewport,
    {
        let threshold = self.threshold(viewport.scroll_top(), viewport.viewport_height());
        let active = active_index(entries.iter().map(|e| e.element.document_top()), threshold);
        self.apply(entries, active);
        active
    }

    /// Remove the active class from every link.
    pub fn clear<L: TocLink, H>(&mut self, entries: &[HeadingEntry<L, H>]) {
        self.apply(entries, None);
    }

    // Single pass: the marker moves without an observable gap or overlap.
    fn apply<L: TocLink, H>(&mut self, entries: &[HeadingEntry<L, H>], active: Option<usize>) {
        for (index, entry) in entries.iter().enumerate() {
            entry.link.set_class(&self.active_class, Some(index) == active);
        }
        if active != self.active {
            log::debug!(
                "Active section {:?} -> {:?}",
                self.active.and_then(|i| entries.get(i)).map(|e| e.id.as_str()),
                active.and_then(|i| entries.get(i)).map(|e| e.id.as_str()),
            );
            self.active = active;
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

    #[test]
    fn test_no_heading_reached() {
        assert_eq!(active_index([500.0, 1000.0], 499.0), None);
        assert_eq!(active_index(std::iter::empty(), 1e9), None);
    }

    #[test]
    fn test_last_reached_heading_wins() {
        assert_eq!(active_index([0.0, 1000.0, 2000.0], 1250.0), Some(1));
        assert_eq!(active_index([0.0, 1000.0, 2000.0], 1e6), Some(2));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(active_index([0.0, 1000.0], 1000.0), Some(1));
    }

    #[test]
    fn test_walk_stops_at_first_unreached() {
        // Out-of-order tops: the third heading sits above the second but is
        // never considered.
        assert_eq!(active_index([0.0, 3000.0, 100.0], 500.0), Some(0));
    }

    #[test]
    fn test_threshold_uses_divisor() {
        let tracker = ActiveSectionTracker::new(&TocConfig::default());
        assert_eq!(tracker.threshold(300.0, 900.0), 600.0);

        let halfway = ActiveSectionTracker::new(&TocConfig {
            activation_divisor: 2.0,
            ..TocConfig::default()
        });
        assert_eq!(halfway.threshold(300.0, 900.0), 750.0);
    }
}
