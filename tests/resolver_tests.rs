//! Heading resolution tests
//!
//! Tests for mapping ToC links to headings: id lookup, the text fallback for
//! headings without normalized ids, dropped links, and the no-op cases.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use tocsync::{HeadingResolver, TocConfig, TocError, TocWidget};

fn resolve(
    document: &FakeDocument,
) -> tocsync::Result<Vec<tocsync::HeadingEntry<FakeLink, FakeHeading>>> {
    let config = TocConfig::default();
    HeadingResolver::new(&config).resolve(document)
}

// =============================================================================
// RESOLUTION
// =============================================================================

#[test]
fn test_resolves_by_id_in_link_order() {
    let (document, _links) = three_sections();
    let entries = resolve(&document).unwrap();

    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["intro", "setup", "usage"]);
    let tops: Vec<f64> = entries
        .iter()
        .map(|e| tocsync::dom::HeadingElement::document_top(&e.element))
        .collect();
    assert_eq!(tops, [0.0, 1000.0, 2000.0]);
}

#[test]
fn test_link_order_is_kept_even_if_document_order_differs() {
    let links = [FakeLink::new("#b", "B"), FakeLink::new("#a", "A")];
    let document = FakeDocument::with_toc(&links)
        .heading_with_id("a", "A", 0.0)
        .heading_with_id("b", "B", 500.0);

    let entries = resolve(&document).unwrap();
    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
}

#[test]
fn test_text_fallback_for_unnormalized_ids() {
    let links = [
        FakeLink::new("#what-is-it", "What is it?"),
        FakeLink::new("#install", "Install"),
    ];
    // The first heading was rendered without an id
    let document = FakeDocument::with_toc(&links)
        .heading("What is it?", 0.0)
        .heading_with_id("install", "Install", 800.0);

    let entries = resolve(&document).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "what-is-it");
    assert_eq!(entries[0].element.text(), "What is it?");
}

#[test]
fn test_text_fallback_trims_whitespace() {
    let links = [FakeLink::new("#x", "\n   Getting started  ")];
    let document = FakeDocument::with_toc(&links).heading("Getting started\n", 120.0);

    let entries = resolve(&document).unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_text_fallback_is_case_sensitive() {
    let links = [FakeLink::new("#x", "getting started")];
    let document = FakeDocument::with_toc(&links).heading("Getting Started", 120.0);

    assert!(matches!(resolve(&document), Err(TocError::NoHeadings(1))));
}

#[test]
fn test_id_match_wins_over_text_match() {
    let links = [FakeLink::new("#usage", "Usage")];
    let document = FakeDocument::with_toc(&links)
        .heading("Usage", 100.0)
        .heading_with_id("usage", "Usage (detailed)", 900.0);

    let entries = resolve(&document).unwrap();
    assert_eq!(entries[0].element.text(), "Usage (detailed)");
}

#[test]
fn test_id_may_point_at_any_element() {
    let links = [FakeLink::new("#appendix", "Appendix")];
    let document = FakeDocument::with_toc(&links).anchor("appendix", 4200.0);

    let entries = resolve(&document).unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_duplicate_heading_text_links_first() {
    let links = [FakeLink::new("#examples-2", "Examples")];
    let document = FakeDocument::with_toc(&links)
        .heading("Examples", 300.0)
        .heading("Examples", 3000.0);

    let entries = resolve(&document).unwrap();
    assert_eq!(
        tocsync::dom::HeadingElement::document_top(&entries[0].element),
        300.0
    );
}

#[test]
fn test_empty_fragment_uses_text() {
    let links = [FakeLink::new("#", "Overview")];
    let document = FakeDocument::with_toc(&links)
        .anchor("", 999.0)
        .heading("Overview", 50.0);

    let entries = resolve(&document).unwrap();
    assert_eq!(entries[0].id, "");
    assert_eq!(entries[0].element.text(), "Overview");
}

#[test]
fn test_heading_list_queried_only_on_miss() {
    let (document, _links) = three_sections();
    resolve(&document).unwrap();
    assert_eq!(document.heading_queries(), 0);

    let links = [
        FakeLink::new("#a", "A"),
        FakeLink::new("#b", "B"),
        FakeLink::new("#c", "C"),
    ];
    let document = FakeDocument::with_toc(&links)
        .heading("A", 0.0)
        .heading("B", 10.0)
        .heading("C", 20.0);
    resolve(&document).unwrap();
    assert_eq!(document.heading_queries(), 1);
}

// =============================================================================
// DROPPED LINKS AND NO-OPS
// =============================================================================

#[test]
fn test_missing_id_without_matching_text_is_dropped() {
    let links = [
        FakeLink::new("#intro", "Intro"),
        FakeLink::new("#missing-id", "Nowhere"),
        FakeLink::new("#usage", "Usage"),
    ];
    let document = FakeDocument::with_toc(&links)
        .heading_with_id("intro", "Intro", 0.0)
        .heading_with_id("usage", "Usage", 2000.0);

    let entries = resolve(&document).unwrap();
    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["intro", "usage"]);
    assert!(entries.len() <= links.len());
}

#[test]
fn test_dropped_link_is_never_styled() {
    let links = [
        FakeLink::new("#intro", "Intro"),
        FakeLink::new("#missing-id", "Nowhere"),
    ];
    let document = FakeDocument::with_toc(&links).heading_with_id("intro", "Intro", 0.0);
    let viewport = FakeViewport::new(0.0, 900.0);

    let mut widget = TocWidget::build(&document, &TocConfig::default()).unwrap();
    for top in [0.0, 500.0, 5000.0, 50_000.0] {
        viewport.set_scroll_top(top);
        widget.recompute(&viewport);
        assert!(links[1].classes().is_empty(), "styled at scrollTop={top}");
    }
}

#[test]
fn test_links_without_fragment_href_are_ignored() {
    let links = [
        FakeLink::without_href("Intro"),
        FakeLink::new("/elsewhere#intro", "Intro"),
        FakeLink::new("#intro", "Intro"),
    ];
    let document = FakeDocument::with_toc(&links).heading_with_id("intro", "Intro", 0.0);

    let entries = resolve(&document).unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_missing_container_is_nothing_to_track() {
    let document = FakeDocument::without_toc().heading("Intro", 0.0);
    let err = resolve(&document).unwrap_err();
    assert!(matches!(err, TocError::MissingContainer(ref id) if id == "table-of-contents-content"));
    assert!(err.is_nothing_to_track());
}

#[test]
fn test_empty_container_is_nothing_to_track() {
    let document = FakeDocument::with_toc(&[]).heading("Intro", 0.0);
    let err = resolve(&document).unwrap_err();
    assert!(matches!(err, TocError::NoLinks(_)));
    assert!(err.is_nothing_to_track());
}

#[test]
fn test_nothing_resolved_is_nothing_to_track() {
    let links = [FakeLink::new("#a", "A"), FakeLink::new("#b", "B")];
    let document = FakeDocument::with_toc(&links).heading("C", 0.0);
    let err = resolve(&document).unwrap_err();
    assert!(matches!(err, TocError::NoHeadings(2)));
    assert!(err.is_nothing_to_track());
}

#[test]
fn test_custom_container_id() {
    let links = [FakeLink::new("#intro", "Intro")];
    let document = FakeDocument::with_toc(&links)
        .container_id("sidebar-toc")
        .heading_with_id("intro", "Intro", 0.0);

    assert!(matches!(
        resolve(&document),
        Err(TocError::MissingContainer(_))
    ));

    let config = TocConfig {
        container_id: "sidebar-toc".to_string(),
        ..TocConfig::default()
    };
    let entries = HeadingResolver::new(&config).resolve(&document).unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_build_rejects_invalid_config_before_resolving() {
    let (document, _links) = three_sections();
    let config = TocConfig {
        activation_divisor: 0.0,
        ..TocConfig::default()
    };
    let err = TocWidget::build(&document, &config).err().unwrap();
    assert!(matches!(err, TocError::Config(_)));
    assert!(!err.is_nothing_to_track());
}
