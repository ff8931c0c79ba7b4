//! Document backend abstraction layer.
//!
//! Provides a trait-based interface for the PDF-manipulation primitives,
//! isolating the concrete PDF library from the layout, replacement, and
//! highlighting logic. The caller opens the document and supplies the
//! handle; this crate never touches files or paths itself.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Alignment, Margins, PageLayout, Rect};

/// Outcome of a rectangle text insertion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// All text fit inside the rectangle.
    Fit,
    /// Some text did not fit; the attempt must be retried with different
    /// parameters.
    Overflow,
    /// The requested font is not available; remaining attempts with the
    /// same font name are pointless.
    FontUnavailable,
}

/// Visual style applied to a highlight annotation.
///
/// All hits of one highlighting pass share a single style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightStyle {
    /// Stroke color as RGB in 0.0..=1.0
    pub color: [f32; 3],
    /// Opacity in 0.0..=1.0
    pub opacity: f32,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 0.0],
            opacity: 0.35,
        }
    }
}

/// Abstract interface for an open document handle.
///
/// Implementations wrap a PDF-manipulation primitive library that can
/// parse pages into positioned text, search for literal text, redact and
/// re-insert rectangular regions, splice pages between documents, and
/// lay out markup onto fresh pages. Search is expected to be
/// case-insensitive and tolerant of line-wrap whitespace, matching how
/// such libraries implement literal page search.
///
/// One handle must not be shared between concurrent writers; callers
/// serialize access per document (one working copy per editing session).
pub trait DocumentOps: Sized {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Fixed-layout snapshot of one page (0-indexed): blocks, lines, and
    /// spans with bounding rectangles and font metadata.
    fn page_layout(&self, index: usize) -> Result<PageLayout>;

    /// Find literal occurrences of `needle` on a page, returning one
    /// bounding rectangle per matched line segment.
    fn search_page(&self, index: usize, needle: &str) -> Result<Vec<Rect>>;

    /// Irreversibly erase all content within a rectangle on a page.
    fn redact(&mut self, index: usize, rect: Rect) -> Result<()>;

    /// Insert text into a rectangle with the given font, size, and
    /// alignment. Reports whether all text fit; an attempt that does not
    /// fit must leave the page unchanged.
    fn insert_text_box(
        &mut self,
        index: usize,
        rect: Rect,
        text: &str,
        font_name: &str,
        font_size: f32,
        alignment: Alignment,
    ) -> Result<InsertOutcome>;

    /// Add a highlight annotation over a rectangle on a page.
    fn add_highlight(&mut self, index: usize, rect: Rect, style: &HighlightStyle) -> Result<()>;

    /// Delete one page (0-indexed).
    fn delete_page(&mut self, index: usize) -> Result<()>;

    /// Insert all pages of `other` into this document, starting at
    /// position `at` (0-indexed). Pages previously at or after `at` shift
    /// back, preserving their order.
    fn insert_pages(&mut self, other: &Self, at: usize) -> Result<()>;

    /// Lay out a standalone markup document onto fresh pages of the given
    /// size and printable area, producing a new document. Content that
    /// overflows the printable area spills onto additional pages.
    fn render_markup(markup: &str, width: f32, height: f32, margins: &Margins) -> Result<Self>;

    /// An independent copy of this document. Mutating the copy must not
    /// affect the original.
    fn duplicate(&self) -> Result<Self>;

    /// Serialize the document to bytes.
    fn save(&self) -> Result<Vec<u8>>;
}
