//! Flow rendering: analyzed pages to reflowable, styled markup.

mod markup;
mod options;

pub use markup::{render_page_markup, MarkupRenderer};
pub use options::MarkupOptions;
