//! Markup-to-page composition and splicing.
//!
//! Takes edited markup and lays it back onto pages matching the original
//! page's size and content box, then splices the result into the source
//! document in place of the edited page. Content that no longer fits one
//! page spills onto additional pages, all inserted at the replaced page's
//! position.

use log::info;
use regex::Regex;

use crate::backend::DocumentOps;
use crate::error::{Error, Result};
use crate::layout::{LayoutAnalyzer, LayoutOptions};
use crate::model::Margins;

/// Target geometry for composed pages: page size plus printable area.
#[derive(Debug, Clone)]
pub struct ContentBox {
    /// Page width in points
    pub page_width: f32,

    /// Page height in points
    pub page_height: f32,

    /// Printable-area margins in points
    pub margins: Margins,
}

impl ContentBox {
    /// Create a new content box.
    pub fn new(page_width: f32, page_height: f32, margins: Margins) -> Self {
        Self {
            page_width,
            page_height,
            margins,
        }
    }

    /// Width of the printable area in points.
    pub fn content_width(&self) -> f32 {
        self.margins.content_width(self.page_width)
    }
}

/// Composes markup into standalone page documents.
pub struct Composer {
    editable_marker: Regex,
    inline_data_image: Regex,
}

impl Composer {
    /// Create a new composer.
    pub fn new() -> Self {
        Self {
            editable_marker: Regex::new(r#"(?i)\s*contenteditable\s*=\s*["']?true["']?"#).unwrap(),
            inline_data_image: Regex::new(r#"(?i)<img[^>]*src="data:image[^"]*"[^>]*>"#).unwrap(),
        }
    }

    /// Strip editor-only markers and embedded inline images from markup
    /// before composition.
    pub fn sanitize(&self, markup: &str) -> String {
        let without_markers = self.editable_marker.replace_all(markup, "");
        self.inline_data_image
            .replace_all(&without_markers, "")
            .into_owned()
    }

    /// Wrap sanitized markup into a standalone page-sized document.
    pub fn page_markup(&self, markup: &str, content_box: &ContentBox) -> String {
        let page_w_in = content_box.page_width / 72.0;
        let page_h_in = content_box.page_height / 72.0;
        let margins = clamp_margins(&content_box.margins);

        let content_width_pt = content_box.page_width - margins.left - margins.right;
        let content_width_in = if content_width_pt > 0.0 {
            content_width_pt / 72.0
        } else {
            // Degenerate margins: fall back to a usable printable width.
            (5.5_f32).max(page_w_in - 1.0)
        };

        format!(
            "<html>\n<head>\n<meta charset=\"utf-8\" />\n<style>\n\
             @page {{\n  size: {page_w_in}in {page_h_in}in;\n  \
             margin-top: {top}pt;\n  margin-right: {right}pt;\n  \
             margin-bottom: {bottom}pt;\n  margin-left: {left}pt;\n}}\n\
             * {{ box-sizing: border-box; }}\n\
             body {{ font-family: 'Times New Roman', Times, serif; font-size: 11pt; \
             color: #000; line-height: 1.25; margin: 0; padding: 0; }}\n\
             .page-container {{ width: {content_width_in}in; max-width: {content_width_in}in; \
             margin: 0 auto; }}\n\
             p {{ margin-top: 0; margin-bottom: 4pt; text-align: justify; line-height: 1.25; \
             font-size: 11pt; word-break: break-word; overflow-wrap: break-word; }}\n\
             h1,h2,h3 {{ margin-top: 10pt; margin-bottom: 4pt; line-height: 1.2; \
             page-break-after: avoid; }}\n\
             strong {{ font-weight: bold; }}\n\
             em {{ font-style: italic; }}\n\
             .page-break {{ page-break-after: always; height: 0; }}\n\
             </style>\n</head>\n<body>\n{body}\n</body>\n</html>",
            top = margins.top,
            right = margins.right,
            bottom = margins.bottom,
            left = margins.left,
            body = self.sanitize(markup),
        )
    }

    /// Compose markup into a standalone document whose pages match the
    /// content box. Fails with [`Error::Render`] without touching any
    /// existing document.
    pub fn compose<D: DocumentOps>(&self, markup: &str, content_box: &ContentBox) -> Result<D> {
        let page_doc = self.page_markup(markup, content_box);
        let margins = clamp_margins(&content_box.margins);
        D::render_markup(
            &page_doc,
            content_box.page_width,
            content_box.page_height,
            &margins,
        )
        .map_err(|e| match e {
            Error::Render(_) => e,
            other => Error::Render(other.to_string()),
        })
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

/// Negative margins never reach the rendering primitive.
fn clamp_margins(margins: &Margins) -> Margins {
    Margins {
        top: margins.top.max(0.0),
        right: margins.right.max(0.0),
        bottom: margins.bottom.max(0.0),
        left: margins.left.max(0.0),
    }
}

/// Compose markup with a default [`Composer`].
pub fn compose<D: DocumentOps>(markup: &str, content_box: &ContentBox) -> Result<D> {
    Composer::new().compose(markup, content_box)
}

/// Replace one page of `doc` with all pages of `rendered`, preserving the
/// order of every other page.
pub fn splice_into<D: DocumentOps>(doc: &mut D, page_index: usize, rendered: &D) -> Result<()> {
    let count = doc.page_count();
    if page_index >= count {
        return Err(Error::PageOutOfRange(page_index as u32 + 1, count as u32));
    }

    doc.delete_page(page_index)?;
    doc.insert_pages(rendered, page_index)?;

    info!(
        "spliced {} page(s) into position {}",
        rendered.page_count(),
        page_index + 1
    );
    Ok(())
}

/// Compose edited markup against the geometry of the page it came from
/// and splice the result back in, returning the updated document bytes.
///
/// The source handle is never mutated; rendering failures surface as
/// [`Error::Render`] before any document is copied or spliced.
pub fn replace_page_with_markup<D: DocumentOps>(
    doc: &D,
    page_index: usize,
    markup: &str,
    layout_options: &LayoutOptions,
) -> Result<Vec<u8>> {
    let count = doc.page_count();
    if page_index >= count {
        return Err(Error::PageOutOfRange(page_index as u32 + 1, count as u32));
    }

    let layout = doc.page_layout(page_index)?;
    let analyzer = LayoutAnalyzer::new(layout_options.clone());
    let analysis = analyzer.analyze_layout(&layout);
    let margins = analyzer.content_margins(&analysis.content_rect, layout.width, layout.height);
    let content_box = ContentBox::new(layout.width, layout.height, margins);

    let rendered: D = compose(markup, &content_box)?;

    let mut updated = doc.duplicate()?;
    splice_into(&mut updated, page_index, &rendered)?;
    updated.save()
}
