//! Widget configuration.
//!
//! Every field has a default matching the stock page markup, so JavaScript
//! only passes the options it wants to change:
//!
//! ```javascript
//! initTableOfContents({ scrollOffset: 64, activeClass: "toc-current" });
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TocError};

/// Id of the element wrapping the ToC links.
pub const DEFAULT_CONTAINER_ID: &str = "table-of-contents-content";
/// Anchors tracked inside the container: in-page fragment links only.
pub const DEFAULT_LINK_SELECTOR: &str = "a[href^=\"#\"]";
/// Headings searched when a fragment does not match any element id.
pub const DEFAULT_HEADING_SELECTOR: &str = "h2, h3";
/// Class toggled on the link of the current section.
pub const DEFAULT_ACTIVE_CLASS: &str = "text-primary";
/// Space reserved above a heading for the fixed page header (CSS pixels).
pub const DEFAULT_SCROLL_OFFSET: f64 = 80.0;
/// A heading counts as reached once it is above `viewport_height / divisor`.
pub const DEFAULT_ACTIVATION_DIVISOR: f64 = 3.0;

/// Options for a [`TocWidget`](crate::widget::TocWidget).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TocConfig {
    pub container_id: String,
    pub link_selector: String,
    pub heading_selector: String,
    pub active_class: String,
    pub scroll_offset: f64,
    pub activation_divisor: f64,
    /// Animate link-triggered scrolls; `false` jumps instantly.
    pub smooth: bool,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            link_selector: DEFAULT_LINK_SELECTOR.to_string(),
            heading_selector: DEFAULT_HEADING_SELECTOR.to_string(),
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            scroll_offset: DEFAULT_SCROLL_OFFSET,
            activation_divisor: DEFAULT_ACTIVATION_DIVISOR,
            smooth: true,
        }
    }
}

impl TocConfig {
    /// Reject options the DOM would choke on later.
    ///
    /// # Errors
    /// Returns [`TocError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("containerId", &self.container_id),
            ("linkSelector", &self.link_selector),
            ("headingSelector", &self.heading_selector),
            ("activeClass", &self.active_class),
        ] {
            if value.trim().is_empty() {
                return Err(TocError::Config(format!("{name} must not be empty")));
            }
        }
        // DOMTokenList.add throws on whitespace
        if self.active_class.chars().any(char::is_whitespace) {
            return Err(TocError::Config(format!(
                "activeClass must be a single class name, got {:?}",
                self.active_class
            )));
        }
        if !self.scroll_offset.is_finite() {
            return Err(TocError::Config("scrollOffset must be finite".to_string()));
        }
        if !self.activation_divisor.is_finite() || self.activation_divisor < 1.0 {
            return Err(TocError::Config(format!(
                "activationDivisor must be a finite number >= 1, got {}",
                self.activation_divisor
            )));
        }
        Ok(())
    }

    /// Build a configuration from a JavaScript options object.
    ///
    /// `undefined` and `null` yield the defaults.
    ///
    /// # Errors
    /// Returns [`TocError::Config`] if the object has the wrong shape or
    /// fails [`TocConfig::validate`].
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(options: wasm_bindgen::JsValue) -> Result<Self> {
        let config = if options.is_undefined() || options.is_null() {
            Self::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| TocError::Config(format!("Invalid options object: {e}")))?
        };
        config.validate()?;
        Ok(config)
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
    fn test_defaults_match_page_markup() {
        let config = TocConfig::default();
        assert_eq!(config.container_id, "table-of-contents-content");
        assert_eq!(config.link_selector, "a[href^=\"#\"]");
        assert_eq!(config.heading_selector, "h2, h3");
        assert_eq!(config.active_class, "text-primary");
        assert_eq!(config.scroll_offset, 80.0);
        assert_eq!(config.activation_divisor, 3.0);
        assert!(config.smooth);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let config = TocConfig {
            container_id: "  ".to_string(),
            ..TocConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("containerId"), "got {err}");
    }

    #[test]
    fn test_class_with_whitespace_rejected() {
        let config = TocConfig {
            active_class: "text-primary font-bold".to_string(),
            ..TocConfig::default()
        };
        assert!(matches!(config.validate(), Err(TocError::Config(_))));
    }

    #[test]
    fn test_non_finite_offset_rejected() {
        let config = TocConfig {
            scroll_offset: f64::NAN,
            ..TocConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_divisor_below_one_rejected() {
        for divisor in [0.0, 0.5, -3.0, f64::INFINITY] {
            let config = TocConfig {
                activation_divisor: divisor,
                ..TocConfig::default()
            };
            assert!(config.validate().is_err(), "divisor {divisor} accepted");
        }
    }
}
