//! Error types for the repdf library.

use std::io;
use thiserror::Error;

/// Result type alias for repdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document editing and annotation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing document bytes.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input text was empty after normalization.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// An anchor could not be located on the target page.
    #[error("Anchor '{anchor}' not found on page {page}")]
    AnchorNotFound {
        /// The anchor text as supplied by the caller.
        anchor: String,
        /// 1-based page number that was searched.
        page: u32,
    },

    /// The anchor pair resolved to most of the page's blocks.
    #[error(
        "Anchors are too broad: selected {selected} of {total} blocks on page {page}; \
         use more specific start/end text"
    )]
    SelectionTooBroad {
        /// Number of blocks in the resolved range.
        selected: usize,
        /// Total blocks on the page.
        total: usize,
        /// 1-based page number.
        page: u32,
    },

    /// No font/size/alignment combination fit the replacement text.
    #[error(
        "Replacement text does not fit in blocks {start_block}..={end_block} on page {page} \
         after {attempts} font/size/alignment attempts"
    )]
    NoFit {
        /// 1-based page number.
        page: u32,
        /// First block index of the replaced range.
        start_block: usize,
        /// Last block index of the replaced range.
        end_block: usize,
        /// Number of insertion attempts made before giving up.
        attempts: usize,
    },

    /// Markup-to-page composition failed at the primitive layer.
    #[error("Markup rendering error: {0}")]
    Render(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error reported by the underlying document backend.
    #[error("Backend error: {0}")]
    Backend(String),
}
