//! Integration tests for boundary-aware highlighting.

mod common;

use common::{MemoryDocument, MemoryPage};
use repdf::{Error, HighlightOptions, HighlightStyle};

fn two_paragraph_page() -> MemoryPage {
    MemoryPage::letter()
        .with_line(
            72.0,
            100.0,
            "The revenue grew strongly in the first quarter.",
            11.0,
            "Helvetica",
        )
        .with_line(
            72.0,
            140.0,
            "Costs remained flat throughout the year.",
            11.0,
            "Helvetica",
        )
}

/// Scenario B: a lone page-number string is still found block-confined.
#[test]
fn test_highlight_single_block_match() {
    let doc = MemoryDocument::new(vec![MemoryPage::letter().with_line(
        500.0,
        770.0,
        "Page 42/100",
        9.0,
        "Helvetica",
    )]);

    let result = repdf::highlight(&doc, "Page 42/100").unwrap();
    assert_eq!(result.total_hits, 1);
    assert_eq!(result.hits.len(), 1);
    assert_eq!(result.hits[0].page, 1);
    assert_eq!(result.first_page, Some(1));
}

/// Scenario E: the same passage on two pages yields two hits and the
/// lower page number for navigation.
#[test]
fn test_highlight_two_pages() {
    let passage = "Costs remained flat throughout the year.";
    let doc = MemoryDocument::new(vec![
        MemoryPage::letter().with_line(72.0, 200.0, passage, 11.0, "Helvetica"),
        MemoryPage::letter().with_line(72.0, 300.0, passage, 11.0, "Helvetica"),
    ]);

    let result = repdf::highlight(&doc, passage).unwrap();
    assert_eq!(result.total_hits, 2);
    let pages: Vec<u32> = result.hits.iter().map(|h| h.page).collect();
    assert_eq!(pages, vec![1, 2]);
    assert_eq!(result.first_page, Some(1));
}

/// Stage 1 confines matches to the containing block: a passage present in
/// one block does not pick up look-alike text from a neighboring block.
#[test]
fn test_highlight_does_not_bleed_into_neighbor_blocks() {
    let doc = MemoryDocument::new(vec![two_paragraph_page()]);

    let result = repdf::highlight(&doc, "Costs remained flat throughout the year.").unwrap();
    assert_eq!(result.total_hits, 1);

    // The annotated rectangle lies inside the second block.
    let rect = result.hits[0].rect;
    assert!(rect.y0 >= 140.0 - 1.0);
    assert!(rect.y1 <= 140.0 + 11.0 * 1.2 + 1.0);
}

/// Highlighting never mutates its input: same target, same document,
/// identical rectangle sets.
#[test]
fn test_highlight_idempotent() {
    let doc = MemoryDocument::new(vec![two_paragraph_page()]);

    let first = repdf::highlight(&doc, "revenue grew strongly").unwrap();
    let second = repdf::highlight(&doc, "revenue grew strongly").unwrap();

    assert_eq!(first.total_hits, second.total_hits);
    assert_eq!(first.hits, second.hits);
    assert_eq!(first.first_page, second.first_page);
    // Source document carries no annotations.
    assert!(doc.page(0).highlights.is_empty());
}

/// Stage 2 runs only when stage 1 annotates nothing: a target spanning
/// two blocks is recovered sentence-by-sentence.
#[test]
fn test_highlight_global_fallback_for_cross_block_target() {
    let doc = MemoryDocument::new(vec![two_paragraph_page()]);

    let target =
        "The revenue grew strongly in the first quarter. Costs remained flat throughout the year.";
    let result = repdf::highlight(&doc, target).unwrap();

    // No single block contains the whole passage, so the sentence-level
    // fallback finds each half once.
    assert_eq!(result.total_hits, 2);
    assert_eq!(result.first_page, Some(1));
}

/// Zero hits is a valid outcome, not an error.
#[test]
fn test_highlight_zero_hits() {
    let doc = MemoryDocument::new(vec![two_paragraph_page()]);

    let result = repdf::highlight(&doc, "entirely absent passage of text").unwrap();
    assert_eq!(result.total_hits, 0);
    assert!(result.hits.is_empty());
    assert_eq!(result.first_page, None);
}

#[test]
fn test_highlight_empty_target_rejected() {
    let doc = MemoryDocument::new(vec![two_paragraph_page()]);
    assert!(matches!(
        repdf::highlight(&doc, "   \n "),
        Err(Error::EmptyInput("target text"))
    ));
}

/// Whitespace in the target is normalized before matching.
#[test]
fn test_highlight_normalizes_whitespace() {
    let doc = MemoryDocument::new(vec![two_paragraph_page()]);

    let result = repdf::highlight(&doc, "Costs remained\nflat   throughout the year.").unwrap();
    assert_eq!(result.total_hits, 1);
}

/// Every annotation carries the uniform style.
#[test]
fn test_highlight_uniform_style() {
    let doc = MemoryDocument::new(vec![two_paragraph_page()]);
    let style = HighlightStyle {
        color: [0.0, 1.0, 0.0],
        opacity: 0.5,
    };
    let options = HighlightOptions::new().with_style(style);

    let result =
        repdf::highlight_with_options(&doc, "revenue grew strongly", &options).unwrap();
    assert_eq!(result.total_hits, 1);

    // The annotated copy carries the custom style; the source does not.
    let saved = String::from_utf8(result.document).unwrap();
    assert!(saved.contains("[highlight 0.00,1.00,0.00 a=0.50]"));
    assert!(doc.page(0).highlights.is_empty());
}

/// Long targets fall back to overlapping word windows when sentences are
/// not found verbatim.
#[test]
fn test_highlight_word_window_fallback() {
    // One long sentence (no ". " boundaries), split across two blocks so
    // neither stage-1 containment nor the full phrase can match.
    let doc = MemoryDocument::new(vec![MemoryPage::letter()
        .with_line(
            72.0,
            100.0,
            "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima",
            11.0,
            "Helvetica",
        )
        .with_line(
            72.0,
            140.0,
            "mike november oscar papa quebec romeo sierra tango uniform victor whiskey xray",
            11.0,
            "Helvetica",
        )]);

    let target = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima \
                  mike november oscar papa quebec romeo sierra tango uniform victor whiskey xray";
    let result = repdf::highlight(&doc, target).unwrap();

    // The first 12-word window lies entirely inside the first block.
    assert!(result.total_hits >= 1);
    assert_eq!(result.first_page, Some(1));
}

#[test]
fn test_search_pages() {
    let doc = MemoryDocument::new(vec![
        MemoryPage::letter().with_line(
            72.0,
            100.0,
            "stability data for the drug product",
            11.0,
            "Helvetica",
        ),
        MemoryPage::letter().with_line(72.0, 100.0, "no match here", 11.0, "Helvetica"),
        MemoryPage::letter().with_line(
            72.0,
            100.0,
            "stability data and more stability data",
            11.0,
            "Helvetica",
        ),
    ]);

    let matches = repdf::search_pages(&doc, "stability data").unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].page, 1);
    assert_eq!(matches[0].count, 1);
    assert_eq!(matches[1].page, 3);
    assert_eq!(matches[1].count, 2);

    assert!(matches!(
        repdf::search_pages(&doc, "  "),
        Err(Error::EmptyInput("search query"))
    ));
}

/// Result types serialize for the request layer.
#[test]
fn test_hits_serialize() {
    let doc = MemoryDocument::new(vec![two_paragraph_page()]);
    let result = repdf::highlight(&doc, "revenue grew strongly").unwrap();

    let json = serde_json::to_string(&result.hits).unwrap();
    assert!(json.contains("\"page\":1"));
    let back: Vec<repdf::PageHighlight> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result.hits);
}
