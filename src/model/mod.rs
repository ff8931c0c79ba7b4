//! Geometry and page model types.
//!
//! This module defines the typed snapshot of a page that the layout
//! analyzer, replacer, and highlighter operate on. Snapshots are produced
//! by the document backend and are immutable; a fresh snapshot is taken
//! whenever the underlying document changes.

mod geometry;
mod page;
mod paragraph;

pub use geometry::{Margins, Rect};
pub use page::{BlockKind, PageLayout, TextBlock, TextLine, TextSpan};
pub use paragraph::{Alignment, PageAnalysis, Paragraph, ParagraphClass};
