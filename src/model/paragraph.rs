//! Derived paragraph types produced by layout analysis.

use super::{Rect, TextLine};
use serde::{Deserialize, Serialize};

/// Style class assigned to a paragraph.
///
/// A paragraph never mixes heading and body lines: a heading line always
/// starts a new paragraph and flushes any pending body paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphClass {
    /// A heading or section label
    Heading,
    /// Regular body text
    Body,
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment
    Left,
    /// Right alignment (page-number paragraphs)
    Right,
    /// Justified alignment (default for body text)
    #[default]
    Justify,
}

impl Alignment {
    /// CSS value for this alignment.
    pub fn css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

/// An ordered group of lines sharing one style class.
///
/// Paragraphs are derived per analysis pass and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Style class (heading or body)
    pub class: ParagraphClass,

    /// Alignment for reflowed rendering
    pub alignment: Alignment,

    /// Aggregate font size: the maximum over member lines
    pub font_size: f32,

    /// Member lines in source order
    pub lines: Vec<TextLine>,
}

impl Paragraph {
    /// Plain text of the paragraph: line texts joined with single spaces.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if this is a heading paragraph.
    pub fn is_heading(&self) -> bool {
        self.class == ParagraphClass::Heading
    }
}

/// The result of analyzing one page: ordered paragraphs plus the tight
/// content bounding box of all text blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAnalysis {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Page width in points
    pub page_width: f32,

    /// Page height in points
    pub page_height: f32,

    /// Tight bounding box of all text blocks (default-margin box when the
    /// page has no text blocks)
    pub content_rect: Rect,

    /// Paragraphs in source line order
    pub paragraphs: Vec<Paragraph>,
}

impl PageAnalysis {
    /// Content width in points.
    pub fn content_width(&self) -> f32 {
        self.content_rect.width()
    }
}
