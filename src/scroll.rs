//! Offset-aware scrolling to a ToC target.

use crate::config::TocConfig;
use crate::dom::{HeadingElement, ScrollMode, ScrollViewport};

/// Scrolls the viewport so a heading lands just below the fixed page header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollController {
    offset: f64,
    mode: ScrollMode,
}

impl ScrollController {
    pub fn new(config: &TocConfig) -> Self {
        Self {
            offset: config.scroll_offset,
            mode: if config.smooth {
                ScrollMode::Smooth
            } else {
                ScrollMode::Instant
            },
        }
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    /// Scroll position that puts `heading_top` `offset` pixels below the
    /// viewport's top edge.
    pub fn target(&self, heading_top: f64) -> f64 {
        heading_top - self.offset
    }

    /// Start scrolling to `heading` and return the requested position.
    ///
    /// Fire and forget: the scroll listener picks up the new position as the
    /// browser animates.
    pub fn scroll_to_heading<H, V>(&self, heading: &H, viewport: &V) -> f64
    where
        H: HeadingElement,
        V: ScrollViewport,
    {
        let top = self.target(heading.document_top());
        viewport.scroll_to(top, self.mode);
        top
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
    fn test_target_subtracts_header_offset() {
        let controller = ScrollController::new(&TocConfig::default());
        assert_eq!(controller.target(1000.0), 920.0);
        // Headings near the top produce negative targets; the browser clamps.
        assert_eq!(controller.target(30.0), -50.0);
    }

    #[test]
    fn test_mode_follows_config() {
        assert_eq!(
            ScrollController::new(&TocConfig::default()).mode(),
            ScrollMode::Smooth
        );
        let instant = ScrollController::new(&TocConfig {
            smooth: false,
            scroll_offset: 0.0,
            ..TocConfig::default()
        });
        assert_eq!(instant.mode(), ScrollMode::Instant);
        assert_eq!(instant.target(640.0), 640.0);
    }
}
