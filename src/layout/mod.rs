//! Page layout analysis.
//!
//! Turns a fixed-layout page snapshot into an ordered sequence of
//! paragraphs plus the page's tight content rectangle, classifying
//! heading vs. body lines along the way.

mod analyzer;
mod options;

pub use analyzer::LayoutAnalyzer;
pub use options::LayoutOptions;
