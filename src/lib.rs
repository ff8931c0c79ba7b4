//! # repdf
//!
//! Paragraph-aware PDF editing, recomposition, and highlighting for Rust.
//!
//! This library reconciles two representations of the same page content,
//! a fixed-coordinate page model and a flowable text model, so that
//! paginated documents can be edited at the paragraph level without
//! disturbing their visual layout. It provides:
//!
//! - **Layout analysis**: group a page's lines into heading/body
//!   paragraphs and compute its tight content rectangle.
//! - **Flow rendering**: convert analyzed paragraphs into reflowable,
//!   styled markup sized to the page's content width.
//! - **Recomposition**: lay edited markup back onto pages matching the
//!   original geometry and splice them into the document (1:1 or 1:N).
//! - **Anchored replacement**: erase the region between two literal text
//!   anchors and re-insert new text with adaptive font fitting.
//! - **Boundary-aware highlighting**: annotate a passage without bleeding
//!   into neighboring paragraphs.
//!
//! The PDF-manipulation primitives live behind the [`DocumentOps`] trait;
//! the caller opens the document with its primitive library of choice and
//! passes the handle in. No files, paths, or network concerns enter this
//! crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use repdf::{DocumentOps, Result};
//!
//! fn edit_first_page<D: DocumentOps>(doc: &D, edited_markup: &str) -> Result<Vec<u8>> {
//!     // Fixed layout -> editable markup
//!     let markup = repdf::analyze_and_render(doc, 0)?;
//!     assert!(markup.starts_with("<div"));
//!
//!     // Edited markup -> updated document bytes
//!     repdf::replace_page_with_markup(doc, 0, edited_markup, &Default::default())
//! }
//!
//! fn annotate<D: DocumentOps + Sync>(doc: &D) -> Result<()> {
//!     let result = repdf::highlight(doc, "Revenue grew 10% in Q1.")?;
//!     println!("{} hit(s), first on page {:?}", result.total_hits, result.first_page);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod compose;
pub mod error;
pub mod highlight;
pub mod layout;
pub mod model;
pub mod render;
pub mod replace;
pub mod text;

// Re-export commonly used types
pub use backend::{DocumentOps, HighlightStyle, InsertOutcome};
pub use compose::{compose, replace_page_with_markup, splice_into, Composer, ContentBox};
pub use error::{Error, Result};
pub use highlight::{
    search_pages, HighlightOptions, HighlightResult, PageHighlight, PageMatch,
};
pub use layout::{LayoutAnalyzer, LayoutOptions};
pub use model::{
    Alignment, BlockKind, Margins, PageAnalysis, PageLayout, Paragraph, ParagraphClass, Rect,
    TextBlock, TextLine, TextSpan,
};
pub use render::{render_page_markup, MarkupOptions, MarkupRenderer};
pub use replace::{FontProfile, ReplaceOptions};

/// Analyze one page (0-indexed) and render it to reflowable markup.
pub fn analyze_and_render<D: DocumentOps>(doc: &D, page_index: usize) -> Result<String> {
    analyze_and_render_with_options(
        doc,
        page_index,
        &LayoutOptions::default(),
        &MarkupOptions::default(),
    )
}

/// Analyze one page and render it to markup with custom options.
pub fn analyze_and_render_with_options<D: DocumentOps>(
    doc: &D,
    page_index: usize,
    layout_options: &LayoutOptions,
    markup_options: &MarkupOptions,
) -> Result<String> {
    let analyzer = LayoutAnalyzer::new(layout_options.clone());
    let analysis = analyzer.analyze(doc, page_index)?;
    Ok(render_page_markup(&analysis, markup_options))
}

/// Analyze every page of a document.
pub fn analyze_document<D: DocumentOps>(
    doc: &D,
    layout_options: &LayoutOptions,
) -> Result<Vec<PageAnalysis>> {
    let analyzer = LayoutAnalyzer::new(layout_options.clone());
    (0..doc.page_count())
        .map(|index| analyzer.analyze(doc, index))
        .collect()
}

/// Render the whole document to markup, one container per page, with
/// page-break markers between pages.
pub fn analyze_and_render_document<D: DocumentOps>(doc: &D) -> Result<String> {
    let markup_options = MarkupOptions::default();
    let analyses = analyze_document(doc, &LayoutOptions::default())?;

    let mut output = String::new();
    let page_count = analyses.len();
    for (i, analysis) in analyses.iter().enumerate() {
        output.push_str(&render_page_markup(analysis, &markup_options));
        if i + 1 < page_count {
            output.push_str(
                "<div class=\"page-break\" style=\"page-break-after: always; height: 20px;\"></div>",
            );
        }
    }
    Ok(output)
}

/// Replace the region between two anchors on a page (1-based) with new
/// text, using default options. See [`replace::replace_anchored`].
pub fn replace_anchored<D: DocumentOps>(
    doc: &D,
    page_number: u32,
    start_anchor: &str,
    end_anchor: &str,
    replacement: &str,
) -> Result<Vec<u8>> {
    replace::replace_anchored(
        doc,
        page_number,
        start_anchor,
        end_anchor,
        replacement,
        &ReplaceOptions::default(),
    )
}

/// Anchored replacement with custom options.
pub fn replace_anchored_with_options<D: DocumentOps>(
    doc: &D,
    page_number: u32,
    start_anchor: &str,
    end_anchor: &str,
    replacement: &str,
    options: &ReplaceOptions,
) -> Result<Vec<u8>> {
    replace::replace_anchored(doc, page_number, start_anchor, end_anchor, replacement, options)
}

/// Highlight all occurrences of a passage, with default options. See
/// [`highlight::highlight`].
pub fn highlight<D: DocumentOps + Sync>(doc: &D, target: &str) -> Result<HighlightResult> {
    highlight::highlight(doc, target, &HighlightOptions::default())
}

/// Highlighting with custom options.
pub fn highlight_with_options<D: DocumentOps + Sync>(
    doc: &D,
    target: &str,
    options: &HighlightOptions,
) -> Result<HighlightResult> {
    highlight::highlight(doc, target, options)
}
