//! Paragraph-grouping layout analyzer.

use log::debug;
use regex::Regex;

use crate::backend::DocumentOps;
use crate::error::{Error, Result};
use crate::model::{
    Alignment, Margins, PageAnalysis, PageLayout, Paragraph, ParagraphClass, Rect, TextBlock,
    TextLine,
};

use super::LayoutOptions;

/// Classification of one line during paragraph grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    /// No non-whitespace content: forces a paragraph break
    Blank,
    /// Heading or section label
    Heading,
    /// Regular body text
    Body,
}

/// Analyzes a page into paragraphs and a content rectangle.
pub struct LayoutAnalyzer {
    options: LayoutOptions,
    section_pattern: Regex,
    page_number_pattern: Regex,
}

impl LayoutAnalyzer {
    /// Create a new analyzer with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            // Structured numbering such as "3.2.P.3 Stability data"
            section_pattern: Regex::new(r"^\s*\d+(\.[A-Za-z0-9]+)+\.?\s").unwrap(),
            // "Page 21/195" or bare "21/195"
            page_number_pattern: Regex::new(r"(?i)(page\s+)?\d+\s*/\s*\d+").unwrap(),
        }
    }

    /// Analyze one page of an open document (0-indexed).
    pub fn analyze<D: DocumentOps>(&self, doc: &D, index: usize) -> Result<PageAnalysis> {
        let count = doc.page_count();
        if index >= count {
            return Err(Error::PageOutOfRange(index as u32 + 1, count as u32));
        }
        let layout = doc.page_layout(index)?;
        Ok(self.analyze_layout(&layout))
    }

    /// Analyze an already-fetched page snapshot.
    pub fn analyze_layout(&self, page: &PageLayout) -> PageAnalysis {
        let mut text_blocks: Vec<&TextBlock> = page.text_blocks().collect();

        let content_rect = Rect::union_all(text_blocks.iter().map(|b| b.bbox))
            .unwrap_or_else(|| self.default_content_rect(page.width, page.height));

        // Process blocks top-to-bottom.
        text_blocks.sort_by(|a, b| {
            a.bbox
                .y0
                .partial_cmp(&b.bbox.y0)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut accumulator = ParagraphAccumulator::new(self);
        for block in &text_blocks {
            for line in &block.lines {
                accumulator.push(line);
            }
            // A block boundary always terminates the pending paragraph.
            accumulator.flush();
        }
        let paragraphs = accumulator.into_paragraphs();

        debug!(
            "page {}: {} text blocks -> {} paragraphs, content {:.1}x{:.1}pt",
            page.number,
            text_blocks.len(),
            paragraphs.len(),
            content_rect.width(),
            content_rect.height()
        );

        PageAnalysis {
            page_number: page.number,
            page_width: page.width,
            page_height: page.height,
            content_rect,
            paragraphs,
        }
    }

    /// Margins around a content rectangle: floored at `margin_floor`, with
    /// `margin_pad` of breathing room, symmetric rule on both axes.
    pub fn content_margins(&self, content: &Rect, page_width: f32, page_height: f32) -> Margins {
        let floor = self.options.margin_floor;
        let pad = self.options.margin_pad;
        Margins {
            left: floor.max(content.x0 - pad),
            right: floor.max(page_width - content.x1 - pad),
            top: floor.max(content.y0 - pad),
            bottom: floor.max(page_height - content.y1 - pad),
        }
    }

    fn default_content_rect(&self, width: f32, height: f32) -> Rect {
        let m = self.options.default_margin;
        Rect::new(m, m, width - m, height - m)
    }

    fn classify(&self, line: &TextLine) -> LineClass {
        let text = line.text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return LineClass::Blank;
        }

        let large_and_short = line.max_font_size() >= self.options.heading_min_font_size
            && trimmed.chars().count() < self.options.heading_max_len;
        let numbered_section = self.section_pattern.is_match(&text);
        let bulleted = text.chars().take(2).any(|c| c == '•');

        if large_and_short || numbered_section || bulleted {
            LineClass::Heading
        } else {
            LineClass::Body
        }
    }

    fn alignment_for(&self, text: &str) -> Alignment {
        if self.page_number_pattern.is_match(text) {
            Alignment::Right
        } else {
            Alignment::Justify
        }
    }
}

impl Default for LayoutAnalyzer {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

/// Paragraph buffer state.
enum BufferState {
    Empty,
    Buffering {
        class: ParagraphClass,
        lines: Vec<TextLine>,
        max_font_size: f32,
    },
}

/// Reducer that folds classified lines into paragraphs.
///
/// Transitions: `Empty -> Buffering` on the first contentful line;
/// `Buffering -> Empty` on flush. A blank line flushes; a heading line
/// (or a buffered heading) flushes before the incoming line starts a new
/// buffer, so heading and body lines never share a paragraph.
struct ParagraphAccumulator<'a> {
    analyzer: &'a LayoutAnalyzer,
    state: BufferState,
    out: Vec<Paragraph>,
}

impl<'a> ParagraphAccumulator<'a> {
    fn new(analyzer: &'a LayoutAnalyzer) -> Self {
        Self {
            analyzer,
            state: BufferState::Empty,
            out: Vec::new(),
        }
    }

    fn push(&mut self, line: &TextLine) {
        let class = match self.analyzer.classify(line) {
            LineClass::Blank => {
                self.flush();
                return;
            }
            LineClass::Heading => ParagraphClass::Heading,
            LineClass::Body => ParagraphClass::Body,
        };

        let buffered = match &self.state {
            BufferState::Empty => {
                self.start(class, line);
                return;
            }
            BufferState::Buffering { class, .. } => *class,
        };

        if class == ParagraphClass::Heading || buffered == ParagraphClass::Heading {
            self.flush();
            self.start(class, line);
        } else if let BufferState::Buffering {
            lines,
            max_font_size,
            ..
        } = &mut self.state
        {
            lines.push(line.clone());
            *max_font_size = max_font_size.max(line.max_font_size());
        }
    }

    fn start(&mut self, class: ParagraphClass, line: &TextLine) {
        self.state = BufferState::Buffering {
            class,
            lines: vec![line.clone()],
            max_font_size: line.max_font_size(),
        };
    }

    fn flush(&mut self) {
        if let BufferState::Buffering {
            class,
            lines,
            max_font_size,
        } = std::mem::replace(&mut self.state, BufferState::Empty)
        {
            let text = lines
                .iter()
                .map(|l| l.text())
                .collect::<Vec<_>>()
                .join(" ");
            let alignment = self.analyzer.alignment_for(&text);
            self.out.push(Paragraph {
                class,
                alignment,
                font_size: max_font_size,
                lines,
            });
        }
    }

    fn into_paragraphs(mut self) -> Vec<Paragraph> {
        self.flush();
        self.out
    }
}
