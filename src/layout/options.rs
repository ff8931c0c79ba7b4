//! Layout analysis options and configuration.

/// Options for page layout analysis.
///
/// The defaults reproduce the tuned production behavior; they are exposed
/// as configuration rather than constants so callers can adjust them per
/// document family.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Minimum span font size for a short line to classify as a heading
    pub heading_min_font_size: f32,

    /// Maximum trimmed length (chars) for a large-font line to classify
    /// as a heading
    pub heading_max_len: usize,

    /// Margin used for the content rectangle when a page has no text
    /// blocks (points)
    pub default_margin: f32,

    /// Smallest margin ever emitted around the content rectangle (points)
    pub margin_floor: f32,

    /// Breathing room subtracted from the content rectangle's edges when
    /// deriving margins (points)
    pub margin_pad: f32,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading font-size threshold.
    pub fn with_heading_min_font_size(mut self, size: f32) -> Self {
        self.heading_min_font_size = size;
        self
    }

    /// Set the heading length ceiling.
    pub fn with_heading_max_len(mut self, len: usize) -> Self {
        self.heading_max_len = len;
        self
    }

    /// Set the fallback margin for pages without text blocks.
    pub fn with_default_margin(mut self, pts: f32) -> Self {
        self.default_margin = pts;
        self
    }

    /// Set the margin floor.
    pub fn with_margin_floor(mut self, pts: f32) -> Self {
        self.margin_floor = pts;
        self
    }

    /// Set the margin pad.
    pub fn with_margin_pad(mut self, pts: f32) -> Self {
        self.margin_pad = pts;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            heading_min_font_size: 12.0,
            heading_max_len: 160,
            default_margin: 72.0,
            margin_floor: 12.0,
            margin_pad: 0.5,
        }
    }
}
