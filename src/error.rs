//! Structured error types for tocsync.
//!
//! Most of these never reach JavaScript: a page without a table of contents
//! is a normal page, so the mount path turns the "nothing to track" variants
//! into a logged no-op.

/// All errors that can occur while mounting or driving a ToC widget.
#[derive(Debug, thiserror::Error)]
pub enum TocError {
    /// The ToC container element is not in the document.
    #[error("ToC container #{0} not found")]
    MissingContainer(String),

    /// The container holds no in-page fragment links.
    #[error("ToC container #{0} has no fragment links")]
    NoLinks(String),

    /// Links were found but none of them resolved to a heading.
    #[error("None of {0} ToC links resolved to a heading")]
    NoHeadings(usize),

    /// Options passed from JavaScript were rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A DOM call failed (listener registration, animation frame request).
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TocError>;

impl TocError {
    /// True for the conditions under which the widget simply stays inert.
    #[must_use]
    pub fn is_nothing_to_track(&self) -> bool {
        matches!(
            self,
            Self::MissingContainer(_) | Self::NoLinks(_) | Self::NoHeadings(_)
        )
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for TocError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<TocError> for wasm_bindgen::JsValue {
    fn from(e: TocError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
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
    fn test_nothing_to_track_variants() {
        assert!(TocError::MissingContainer("toc".into()).is_nothing_to_track());
        assert!(TocError::NoLinks("toc".into()).is_nothing_to_track());
        assert!(TocError::NoHeadings(3).is_nothing_to_track());
        assert!(!TocError::Config("bad".into()).is_nothing_to_track());
        assert!(!TocError::Dom("boom".into()).is_nothing_to_track());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TocError::MissingContainer("table-of-contents-content".into()).to_string(),
            "ToC container #table-of-contents-content not found"
        );
        assert_eq!(
            TocError::NoHeadings(4).to_string(),
            "None of 4 ToC links resolved to a heading"
        );
    }
}
