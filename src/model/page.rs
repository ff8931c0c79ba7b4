//! Page-level snapshot types.

use super::Rect;
use serde::{Deserialize, Serialize};

/// A fixed-layout snapshot of a single page.
///
/// Blocks are ordered top-to-bottom by vertical position. The snapshot is
/// immutable; any mutation of the underlying document invalidates it and a
/// new one must be fetched from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Layout blocks on the page
    pub blocks: Vec<TextBlock>,
}

impl PageLayout {
    /// Create a new page snapshot with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: TextBlock) {
        self.blocks.push(block);
    }

    /// Iterate text blocks only (non-text blocks are skipped by all
    /// core operations).
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter().filter(|b| b.is_text())
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

/// Kind of layout block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// A block of text lines
    Text,
    /// An image or other non-text content
    Image,
}

/// A contiguous layout unit on a page, typically one paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// Block kind
    pub kind: BlockKind,

    /// Bounding rectangle in page coordinates
    pub bbox: Rect,

    /// Lines in this block, in reading order
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Create a new text block.
    pub fn new(bbox: Rect, lines: Vec<TextLine>) -> Self {
        Self {
            kind: BlockKind::Text,
            bbox,
            lines,
        }
    }

    /// Create a non-text block (image etc.).
    pub fn image(bbox: Rect) -> Self {
        Self {
            kind: BlockKind::Image,
            bbox,
            lines: Vec::new(),
        }
    }

    /// Check if this is a text block.
    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }

    /// Get the combined text of all lines, newline-separated.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the block has no non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.text().trim().is_empty())
    }
}

/// A line of text composed of styled spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    /// Bounding rectangle in page coordinates
    pub bbox: Rect,

    /// The spans in this line, left-to-right
    pub spans: Vec<TextSpan>,
}

impl TextLine {
    /// Create a new line from spans.
    pub fn new(bbox: Rect, spans: Vec<TextSpan>) -> Self {
        Self { bbox, spans }
    }

    /// Get the line text: spans concatenated left-to-right, whitespace
    /// between spans preserved verbatim.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Largest span font size in this line, or 0.0 for an empty line.
    pub fn max_font_size(&self) -> f32 {
        self.spans.iter().map(|s| s.font_size).fold(0.0, f32::max)
    }
}

/// The smallest styled run of text within a line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSpan {
    /// The raw text content
    pub text: String,

    /// Font size in points
    pub font_size: f32,

    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,

    /// Whether the span is bold
    pub bold: bool,

    /// Whether the span is italic
    pub italic: bool,
}

impl TextSpan {
    /// Create a new span, deriving bold/italic flags from the font name.
    pub fn new(text: impl Into<String>, font_size: f32, font_name: impl Into<String>) -> Self {
        let font_name = font_name.into();
        let lower = font_name.to_lowercase();
        let bold = lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        let italic = lower.contains("italic") || lower.contains("oblique");

        Self {
            text: text.into(),
            font_size,
            font_name,
            bold,
            italic,
        }
    }

    /// Create a span with explicit style flags.
    pub fn styled(
        text: impl Into<String>,
        font_size: f32,
        font_name: impl Into<String>,
        bold: bool,
        italic: bool,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: font_name.into(),
            bold,
            italic,
        }
    }
}
