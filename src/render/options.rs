//! Markup rendering options.

/// Options for rendering analyzed pages to markup.
#[derive(Debug, Clone)]
pub struct MarkupOptions {
    /// Line height multiplier applied to every paragraph
    pub line_height: f32,

    /// Vertical gap after each paragraph in points
    pub paragraph_gap_pt: f32,

    /// Tag used for heading paragraphs
    pub heading_tag: &'static str,
}

impl MarkupOptions {
    /// Create new markup options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line height multiplier.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Set the paragraph gap.
    pub fn with_paragraph_gap(mut self, pts: f32) -> Self {
        self.paragraph_gap_pt = pts;
        self
    }
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            line_height: 1.25,
            paragraph_gap_pt: 4.0,
            heading_tag: "h3",
        }
    }
}
