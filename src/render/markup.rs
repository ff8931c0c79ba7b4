//! Markup rendering for analyzed pages.
//!
//! A pure function of its input: the same analysis always produces the
//! same markup, with no side effects.

use crate::model::{PageAnalysis, Paragraph, ParagraphClass, TextSpan};

use super::MarkupOptions;

/// Convert one page analysis to reflowable markup.
pub fn render_page_markup(analysis: &PageAnalysis, options: &MarkupOptions) -> String {
    let renderer = MarkupRenderer::new(options.clone());
    renderer.render(analysis)
}

/// Markup renderer.
pub struct MarkupRenderer {
    options: MarkupOptions,
}

impl MarkupRenderer {
    /// Create a new markup renderer.
    pub fn new(options: MarkupOptions) -> Self {
        Self { options }
    }

    /// Render an analyzed page into a container sized to its content
    /// width, one block-level element per paragraph.
    pub fn render(&self, analysis: &PageAnalysis) -> String {
        let content_width_in = analysis.content_width() / 72.0;

        let mut output = String::new();
        output.push_str(&format!(
            "<div class=\"page-container\" data-page=\"{}\" style=\"width: {}in; \
             max-width: {}in; margin: 0 auto; padding: 0; box-sizing: border-box;\">",
            analysis.page_number, content_width_in, content_width_in
        ));

        for paragraph in &analysis.paragraphs {
            self.render_paragraph(&mut output, paragraph);
        }

        output.push_str("</div>");
        output
    }

    fn render_paragraph(&self, output: &mut String, paragraph: &Paragraph) {
        let tag = match paragraph.class {
            ParagraphClass::Heading => self.options.heading_tag,
            ParagraphClass::Body => "p",
        };

        output.push_str(&format!(
            "<{} style=\"text-align: {}; margin-top: 0; margin-bottom: {}pt; \
             line-height: {}; font-size: {}pt;\">",
            tag,
            paragraph.alignment.css(),
            self.options.paragraph_gap_pt,
            self.options.line_height,
            paragraph.font_size
        ));

        for (i, line) in paragraph.lines.iter().enumerate() {
            if i > 0 {
                output.push(' ');
            }
            for span in &line.spans {
                self.render_span(output, span);
            }
        }

        output.push_str(&format!("</{}>", tag));
    }

    fn render_span(&self, output: &mut String, span: &TextSpan) {
        let text = escape_markup(&span.text);
        match (span.bold, span.italic) {
            (true, true) => output.push_str(&format!("<strong><em>{}</em></strong>", text)),
            (true, false) => output.push_str(&format!("<strong>{}</strong>", text)),
            (false, true) => output.push_str(&format!("<em>{}</em>", text)),
            (false, false) => output.push_str(&text),
        }
    }
}

/// Escape text for embedding in markup.
fn escape_markup(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
