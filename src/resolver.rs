//! Maps ToC links to the headings they point at.

use crate::config::TocConfig;
use crate::dom::{HeadingElement, TocDocument, TocLink};
use crate::error::{Result, TocError};

/// One tracked ToC link and the heading it navigates to.
#[derive(Debug, Clone)]
pub struct HeadingEntry<L, H> {
    pub link: L,
    pub element: H,
    /// Fragment identifier from the link's `href`, without the `#`.
    pub id: String,
}

/// Fragment identifier of an in-page link: everything after the leading `#`.
///
/// Returns `None` for hrefs that are not in-page fragments.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

/// Builds the ordered [`HeadingEntry`] sequence for a ToC container.
#[derive(Debug, Clone, Copy)]
pub struct HeadingResolver<'a> {
    container_id: &'a str,
    link_selector: &'a str,
    heading_selector: &'a str,
}

impl<'a> HeadingResolver<'a> {
    pub fn new(config: &'a TocConfig) -> Self {
        Self {
            container_id: &config.container_id,
            link_selector: &config.link_selector,
            heading_selector: &config.heading_selector,
        }
    }

    /// Resolve every link in the container, in link order.
    ///
    /// A link resolves to the element whose id equals its fragment, or else
    /// to the first heading whose trimmed text equals the link's trimmed
    /// text. Links that resolve to nothing are left out.
    ///
    /// # Errors
    /// [`TocError::MissingContainer`], [`TocError::NoLinks`] or
    /// [`TocError::NoHeadings`] when there is nothing to track.
    pub fn resolve<D: TocDocument>(
        &self,
        document: &D,
    ) -> Result<Vec<HeadingEntry<D::Link, D::Heading>>> {
        let links = document
            .container_links(self.container_id, self.link_selector)
            .ok_or_else(|| TocError::MissingContainer(self.container_id.to_string()))?;
        if links.is_empty() {
            return Err(TocError::NoLinks(self.container_id.to_string()));
        }

        let link_count = links.len();
        // Only queried if some fragment misses
        let mut headings: Option<Vec<D::Heading>> = None;
        let mut entries = Vec::with_capacity(link_count);

        for link in links {
            let Some(href) = link.href() else {
                continue;
            };
            let Some(id) = fragment_id(&href) else {
                continue;
            };

            let by_id = if id.is_empty() {
                None
            } else {
                document.element_by_id(id)
            };
            let element = match by_id {
                Some(element) => Some(element),
                None => {
                    let headings = headings
                        .get_or_insert_with(|| document.query_headings(self.heading_selector));
                    match_by_text(headings.as_slice(), &link.label())
                }
            };

            match element {
                Some(element) => entries.push(HeadingEntry {
                    link,
                    element,
                    id: id.to_string(),
                }),
                None => log::debug!("ToC link {href:?} matches no heading, skipping"),
            }
        }

        if entries.is_empty() {
            return Err(TocError::NoHeadings(link_count));
        }
        log::debug!(
            "Resolved {} of {} ToC links in #{}",
            entries.len(),
            link_count,
            self.container_id
        );
        Ok(entries)
    }
}

/// Strip surrounding whitespace, including the U+FEFF no-break space that
/// DOM text trimming also removes.
pub(crate) fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// First heading whose trimmed text equals the trimmed label.
fn match_by_text<H: HeadingElement + Clone>(headings: &[H], label: &str) -> Option<H> {
    let label = trim_text(label);
    let mut matches = headings.iter().filter(|h| trim_text(&h.heading_text()) == label);
    let first = matches.next()?;
    if matches.next().is_some() {
        log::debug!("Several headings read {label:?}; linking the first");
    }
    Some(first.clone())
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

    #[derive(Debug, Clone, PartialEq)]
    struct Heading(&'static str, f64);

    impl HeadingElement for Heading {
        fn heading_text(&self) -> String {
            self.0.to_string()
        }

        fn document_top(&self) -> f64 {
            self.1
        }
    }

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#intro"), Some("intro"));
        assert_eq!(fragment_id("#"), Some(""));
        assert_eq!(fragment_id("#a#b"), Some("a#b"));
        assert_eq!(fragment_id("/docs#intro"), None);
        assert_eq!(fragment_id("intro"), None);
    }

    #[test]
    fn test_match_by_text_trims_both_sides() {
        let headings = vec![Heading("  Setup\n", 10.0), Heading("Usage", 20.0)];
        assert_eq!(match_by_text(&headings, " Setup "), Some(Heading("  Setup\n", 10.0)));
        assert_eq!(match_by_text(&headings, "setup"), None);
    }

    #[test]
    fn test_match_by_text_strips_byte_order_mark() {
        let headings = vec![Heading("\u{feff}Setup", 10.0), Heading("Usage", 20.0)];
        assert_eq!(match_by_text(&headings, "Setup\u{feff} ").map(|h| h.1), Some(10.0));
        assert_eq!(trim_text("\u{feff}\u{a0} Usage\t"), "Usage");
        assert_eq!(trim_text("Set\u{feff}up"), "Set\u{feff}up");
    }

    #[test]
    fn test_match_by_text_picks_first_duplicate() {
        let headings = vec![Heading("Examples", 100.0), Heading("Examples", 900.0)];
        assert_eq!(match_by_text(&headings, "Examples").map(|h| h.1), Some(100.0));
    }
}
