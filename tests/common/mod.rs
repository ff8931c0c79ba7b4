//! In-memory mock backend for integration tests.
//!
//! `MemoryDocument` implements `DocumentOps` over a deterministic
//! character-grid text model: every character occupies `font_size * 0.5`
//! points of width and lines are `font_size * 1.2` points tall. That is
//! enough to exercise search geometry, redaction, fit decisions, markup
//! pagination, and splicing without a real PDF library.

use std::sync::{Arc, Mutex};

use repdf::{
    Alignment, DocumentOps, Error, HighlightStyle, InsertOutcome, Margins, PageLayout, Rect,
    Result, TextBlock, TextLine, TextSpan,
};

/// Width of one character, as a multiple of the font size.
pub const CHAR_WIDTH_FACTOR: f32 = 0.5;
/// Line height, as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// One recorded text-insertion attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertAttempt {
    pub font: String,
    pub size: f32,
    pub alignment: Alignment,
}

#[derive(Debug, Clone)]
pub struct MemoryPage {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<TextBlock>,
    pub highlights: Vec<(Rect, HighlightStyle)>,
    pub redactions: Vec<Rect>,
}

impl MemoryPage {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            blocks: Vec::new(),
            highlights: Vec::new(),
            redactions: Vec::new(),
        }
    }

    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// Add a single-line text block at the given position.
    pub fn with_line(self, x0: f32, y0: f32, text: &str, size: f32, font: &str) -> Self {
        self.with_paragraph(x0, y0, &[text], size, font)
    }

    /// Add a multi-line text block, lines stacked vertically.
    pub fn with_paragraph(
        mut self,
        x0: f32,
        y0: f32,
        lines: &[&str],
        size: f32,
        font: &str,
    ) -> Self {
        let line_height = size * LINE_HEIGHT_FACTOR;
        let mut text_lines = Vec::new();
        for (i, text) in lines.iter().enumerate() {
            let top = y0 + i as f32 * line_height;
            let width = text.chars().count() as f32 * size * CHAR_WIDTH_FACTOR;
            let bbox = Rect::new(x0, top, x0 + width, top + line_height);
            text_lines.push(TextLine::new(bbox, vec![TextSpan::new(*text, size, font)]));
        }
        let bbox = Rect::union_all(text_lines.iter().map(|l| l.bbox)).unwrap();
        self.blocks.push(TextBlock::new(bbox, text_lines));
        self
    }

    /// Add a non-text (image) block.
    pub fn with_image(mut self, bbox: Rect) -> Self {
        self.blocks.push(TextBlock::image(bbox));
        self
    }

    fn text(&self) -> String {
        let mut text = self
            .blocks
            .iter()
            .filter(|b| b.is_text())
            .map(|b| b.text())
            .collect::<Vec<_>>()
            .join("\n\n");
        for (_, style) in &self.highlights {
            text.push_str(&format!(
                "\n[highlight {:.2},{:.2},{:.2} a={:.2}]",
                style.color[0], style.color[1], style.color[2], style.opacity
            ));
        }
        text
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pub pages: Vec<MemoryPage>,
    pub unavailable_fonts: Vec<String>,
    /// Shared across duplicates so tests can observe attempts made on
    /// internal working copies.
    pub insert_log: Arc<Mutex<Vec<InsertAttempt>>>,
}

impl MemoryDocument {
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self {
            pages,
            unavailable_fonts: Vec::new(),
            insert_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_unavailable_font(mut self, font: &str) -> Self {
        self.unavailable_fonts.push(font.to_string());
        self
    }

    pub fn insert_attempts(&self) -> Vec<InsertAttempt> {
        self.insert_log.lock().unwrap().clone()
    }

    pub fn page(&self, index: usize) -> &MemoryPage {
        &self.pages[index]
    }

    fn page_mut(&mut self, index: usize) -> Result<&mut MemoryPage> {
        let count = self.pages.len();
        self.pages
            .get_mut(index)
            .ok_or(Error::PageOutOfRange(index as u32 + 1, count as u32))
    }
}

impl DocumentOps for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_layout(&self, index: usize) -> Result<PageLayout> {
        let page = self
            .pages
            .get(index)
            .ok_or(Error::PageOutOfRange(index as u32 + 1, self.pages.len() as u32))?;
        let mut layout = PageLayout::new(index as u32 + 1, page.width, page.height);
        for block in &page.blocks {
            layout.add_block(block.clone());
        }
        Ok(layout)
    }

    fn search_page(&self, index: usize, needle: &str) -> Result<Vec<Rect>> {
        let page = self
            .pages
            .get(index)
            .ok_or(Error::PageOutOfRange(index as u32 + 1, self.pages.len() as u32))?;
        let needle = needle.to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let mut rects = Vec::new();
        for block in page.blocks.iter().filter(|b| b.is_text()) {
            for line in &block.lines {
                let hay = line.text().to_lowercase();
                let total = hay.len().max(1) as f32;
                let mut from = 0;
                while let Some(pos) = hay[from..].find(&needle) {
                    let at = from + pos;
                    let x0 = line.bbox.x0 + line.bbox.width() * (at as f32 / total);
                    let x1 = line.bbox.x0
                        + line.bbox.width() * ((at + needle.len()) as f32 / total);
                    rects.push(Rect::new(x0, line.bbox.y0, x1, line.bbox.y1));
                    from = at + needle.len();
                }
            }
        }
        Ok(rects)
    }

    fn redact(&mut self, index: usize, rect: Rect) -> Result<()> {
        let page = self.page_mut(index)?;
        page.redactions.push(rect);
        page.blocks
            .retain(|b| !(b.is_text() && rect.contains_with_tolerance(&b.bbox, 0.5)));
        Ok(())
    }

    fn insert_text_box(
        &mut self,
        index: usize,
        rect: Rect,
        text: &str,
        font_name: &str,
        font_size: f32,
        alignment: Alignment,
    ) -> Result<InsertOutcome> {
        self.insert_log.lock().unwrap().push(InsertAttempt {
            font: font_name.to_string(),
            size: font_size,
            alignment,
        });

        if self.unavailable_fonts.iter().any(|f| f == font_name) {
            return Ok(InsertOutcome::FontUnavailable);
        }

        let cols = (rect.width() / (font_size * CHAR_WIDTH_FACTOR)).floor().max(0.0) as usize;
        let rows = (rect.height() / (font_size * LINE_HEIGHT_FACTOR)).floor().max(0.0) as usize;
        eprintln!("DBG insert font={} size={} rectw={} recth={} cols={} rows={} textlen={}", font_name, font_size, rect.width(), rect.height(), cols, rows, text.chars().count());
        if cols == 0 || rows == 0 || text.chars().count() > cols * rows {
            return Ok(InsertOutcome::Overflow);
        }

        let page = self.page_mut(index)?;
        page.blocks.push(TextBlock::new(
            rect,
            vec![TextLine::new(
                rect,
                vec![TextSpan::new(text, font_size, font_name)],
            )],
        ));
        Ok(InsertOutcome::Fit)
    }

    fn add_highlight(&mut self, index: usize, rect: Rect, style: &HighlightStyle) -> Result<()> {
        self.page_mut(index)?.highlights.push((rect, *style));
        Ok(())
    }

    fn delete_page(&mut self, index: usize) -> Result<()> {
        if index >= self.pages.len() {
            return Err(Error::PageOutOfRange(
                index as u32 + 1,
                self.pages.len() as u32,
            ));
        }
        self.pages.remove(index);
        Ok(())
    }

    fn insert_pages(&mut self, other: &Self, at: usize) -> Result<()> {
        let at = at.min(self.pages.len());
        for (offset, page) in other.pages.iter().enumerate() {
            self.pages.insert(at + offset, page.clone());
        }
        Ok(())
    }

    fn render_markup(markup: &str, width: f32, height: f32, margins: &Margins) -> Result<Self> {
        let paragraphs = markup_paragraphs(markup);
        if paragraphs.is_empty() {
            return Err(Error::Render("no content to lay out".to_string()));
        }

        let font_size = 11.0_f32;
        let char_width = font_size * CHAR_WIDTH_FACTOR;
        let line_height = font_size * LINE_HEIGHT_FACTOR;
        let content_width = margins.content_width(width).max(char_width);
        let content_height = margins.content_height(height).max(line_height);
        let cols = (content_width / char_width).floor().max(1.0) as usize;
        let max_rows = (content_height / line_height).floor().max(1.0) as usize;

        let mut pages = Vec::new();
        let mut current = MemoryPage::new(width, height);
        let mut row = 0usize;

        for text in paragraphs {
            // Oversized paragraphs are split into page-sized chunks.
            let chunk_chars = cols * max_rows;
            let chars: Vec<char> = text.chars().collect();
            for chunk in chars.chunks(chunk_chars) {
                let chunk: String = chunk.iter().collect();
                let rows_needed = chunk.chars().count().div_ceil(cols).max(1);
                if row + rows_needed > max_rows && row > 0 {
                    pages.push(std::mem::replace(
                        &mut current,
                        MemoryPage::new(width, height),
                    ));
                    row = 0;
                }
                let top = margins.top + row as f32 * line_height;
                let bbox = Rect::new(
                    margins.left,
                    top,
                    margins.left + content_width,
                    top + rows_needed as f32 * line_height,
                );
                current.blocks.push(TextBlock::new(
                    bbox,
                    vec![TextLine::new(
                        bbox,
                        vec![TextSpan::new(chunk, font_size, "Times-Roman")],
                    )],
                ));
                row += rows_needed;
            }
        }
        pages.push(current);

        Ok(Self::new(pages))
    }

    fn duplicate(&self) -> Result<Self> {
        Ok(self.clone())
    }

    fn save(&self) -> Result<Vec<u8>> {
        let text = self
            .pages
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\u{c}");
        Ok(text.into_bytes())
    }
}

/// Extract paragraph texts from markup: the body content split at
/// block-level closing tags, with all tags stripped.
fn markup_paragraphs(markup: &str) -> Vec<String> {
    let body = match (markup.find("<body>"), markup.find("</body>")) {
        (Some(start), Some(end)) if start + 6 <= end => &markup[start + 6..end],
        _ => markup,
    };

    let mut separated = body.to_string();
    for tag in ["</p>", "</h1>", "</h2>", "</h3>"] {
        separated = separated.replace(tag, "\u{1e}");
    }

    separated
        .split('\u{1e}')
        .map(strip_tags)
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
        .collect()
}

fn strip_tags(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// A page's plain text, for assertions on saved bytes.
pub fn saved_text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}
