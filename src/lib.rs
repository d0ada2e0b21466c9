//! tocsync - table-of-contents scroll spy for the web
//!
//! Keeps a ToC navigation list in step with the reader's position in a long
//! document, compiled to WebAssembly:
//! - Highlights the link of the section currently in view
//! - Smooth, header-offset-aware scrolling when a link is clicked
//! - At most one recomputation per animation frame, however fast the page scrolls
//!
//! # Usage (JavaScript)
//!
//! With the default `auto-init` feature, loading the module is enough for the
//! stock markup (`#table-of-contents-content`). Custom options:
//!
//! ```javascript
//! import init, { initTableOfContents, TocSync } from 'tocsync';
//! await init();
//! initTableOfContents({ scrollOffset: 64 });
//! // or, once the DOM is ready, keep a handle:
//! const toc = TocSync.mount({ containerId: 'sidebar-toc' });
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod frame;
pub mod resolver;
pub mod scroll;
pub mod tracker;
pub mod widget;

use wasm_bindgen::prelude::*;

pub use config::TocConfig;
pub use error::{Result, TocError};
pub use resolver::{HeadingEntry, HeadingResolver};
pub use widget::{TocSnapshot, TocWidget};

#[cfg(target_arch = "wasm32")]
pub use widget::{init_table_of_contents, TocSync};

/// Module start hook: panic reporting, optional console logging, and
/// mounting the default widget.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        let _ = console_log::init_with_level(log::Level::Debug);
    }

    #[cfg(feature = "auto-init")]
    widget::mount_when_ready(TocConfig::default());
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
