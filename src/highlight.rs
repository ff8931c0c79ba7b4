//! Boundary-aware highlighting.
//!
//! Finds literal occurrences of a target passage and annotates them,
//! preferring matches confined to a single paragraph block so highlights
//! never bleed into neighboring paragraphs. A document-wide phrase search
//! runs only when the block-confined stage finds nothing.

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::backend::{DocumentOps, HighlightStyle};
use crate::error::{Error, Result};
use crate::model::Rect;
use crate::text::{normalize_passage, sentence_phrases, word_windows};

/// Options for highlighting.
#[derive(Debug, Clone)]
pub struct HighlightOptions {
    /// Style applied uniformly to every annotated rectangle
    pub style: HighlightStyle,

    /// Minimum length (chars) for a sentence to be tried as a sub-phrase
    pub min_sentence_len: usize,

    /// Minimum length (chars) for a word-window chunk to be tried
    pub min_chunk_len: usize,

    /// Words per overlapping window chunk
    pub window_words: usize,

    /// Smallest stepping between window chunks, in words (one third of
    /// the target length when larger)
    pub window_min_step: usize,

    /// Targets longer than this many words also get window chunks
    pub long_target_words: usize,

    /// Tolerance (points) when testing whether a match rectangle falls
    /// inside its candidate block
    pub bbox_tolerance: f32,
}

impl HighlightOptions {
    /// Create new highlight options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the highlight style.
    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the block-containment tolerance.
    pub fn with_bbox_tolerance(mut self, tolerance: f32) -> Self {
        self.bbox_tolerance = tolerance;
        self
    }

    /// Set the sentence-length minimum.
    pub fn with_min_sentence_len(mut self, len: usize) -> Self {
        self.min_sentence_len = len;
        self
    }
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            style: HighlightStyle::default(),
            min_sentence_len: 20,
            min_chunk_len: 30,
            window_words: 12,
            window_min_step: 7,
            long_target_words: 15,
            bbox_tolerance: 1.0,
        }
    }
}

/// One annotated rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageHighlight {
    /// 1-based page number
    pub page: u32,
    /// Annotated rectangle in page coordinates
    pub rect: Rect,
}

/// The outcome of a highlighting pass.
///
/// Zero hits is a valid outcome, not an error; `first_page` is `None`
/// in that case.
#[derive(Debug, Clone)]
pub struct HighlightResult {
    /// The annotated copy of the document
    pub document: Vec<u8>,

    /// Every annotated (page, rectangle) pair, in annotation order
    pub hits: Vec<PageHighlight>,

    /// Lowest page number among the hits, for navigation
    pub first_page: Option<u32>,

    /// Total number of annotated rectangles
    pub total_hits: usize,
}

/// Literal-search match count for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMatch {
    /// 1-based page number
    pub page: u32,
    /// Number of occurrences on the page
    pub count: usize,
}

/// Highlight all occurrences of `target` in the document, returning an
/// annotated copy. The source handle is never mutated.
pub fn highlight<D: DocumentOps + Sync>(
    doc: &D,
    target: &str,
    options: &HighlightOptions,
) -> Result<HighlightResult> {
    let norm = normalize_passage(target);
    if norm.is_empty() {
        return Err(Error::EmptyInput("target text"));
    }

    let mut work = doc.duplicate()?;
    let mut hits: Vec<PageHighlight> = Vec::new();

    // Stage 1: block-confined. Find every block whose normalized text
    // contains the whole target, then annotate only rectangles that stay
    // inside that block.
    let candidates = containing_blocks(doc, &norm)?;
    debug!("stage 1: {} candidate blocks contain the target", candidates.len());

    for (page_index, block_bbox) in &candidates {
        let mut phrases = vec![norm.clone()];
        for sentence in sentence_phrases(&norm, options.min_sentence_len) {
            if !phrases.contains(&sentence) {
                phrases.push(sentence);
            }
        }

        for phrase in &phrases {
            let rects = work.search_page(*page_index, phrase)?;
            let confined: Vec<Rect> = rects
                .into_iter()
                .filter(|r| block_bbox.contains_with_tolerance(r, options.bbox_tolerance))
                .collect();

            if !confined.is_empty() {
                debug!(
                    "stage 1: {} confined match(es) on page {}",
                    confined.len(),
                    page_index + 1
                );
                for rect in confined {
                    work.add_highlight(*page_index, rect, &options.style)?;
                    hits.push(PageHighlight {
                        page: *page_index as u32 + 1,
                        rect,
                    });
                }
                break;
            }
        }
    }

    // Stage 2: global fallback, only when stage 1 annotated nothing.
    // More permissive; each phrase stops at the first page it is found on.
    if hits.is_empty() {
        warn!("stage 1 found no block-confined matches; falling back to global search");
        stage_two(&mut work, &norm, options, &mut hits)?;
    }

    let first_page = hits.iter().map(|h| h.page).min();
    let total_hits = hits.len();
    info!(
        "highlighting complete: {} hit(s), first page {:?}",
        total_hits, first_page
    );

    Ok(HighlightResult {
        document: work.save()?,
        hits,
        first_page,
        total_hits,
    })
}

/// Collect (page index, block bbox) for every text block whose
/// normalized text contains the normalized target. Pages are scanned in
/// parallel; the result preserves page order.
fn containing_blocks<D: DocumentOps + Sync>(doc: &D, norm: &str) -> Result<Vec<(usize, Rect)>> {
    let per_page: Vec<Vec<(usize, Rect)>> = (0..doc.page_count())
        .into_par_iter()
        .map(|index| -> Result<Vec<(usize, Rect)>> {
            let layout = doc.page_layout(index)?;
            Ok(layout
                .text_blocks()
                .filter(|block| normalize_passage(&block.text()).contains(norm))
                .map(|block| (index, block.bbox))
                .collect())
        })
        .collect::<Result<_>>()?;

    Ok(per_page.into_iter().flatten().collect())
}

fn stage_two<D: DocumentOps>(
    work: &mut D,
    norm: &str,
    options: &HighlightOptions,
    hits: &mut Vec<PageHighlight>,
) -> Result<()> {
    let mut phrases = vec![norm.to_string()];
    for sentence in sentence_phrases(norm, options.min_sentence_len) {
        if !phrases.contains(&sentence) {
            phrases.push(sentence);
        }
    }
    let words = norm.split_whitespace().count();
    if words > options.long_target_words {
        for chunk in word_windows(
            norm,
            options.window_words,
            options.window_min_step,
            options.min_chunk_len,
        ) {
            if !phrases.contains(&chunk) {
                phrases.push(chunk);
            }
        }
    }

    debug!("stage 2: trying {} phrase(s) across all pages", phrases.len());

    for phrase in &phrases {
        for page_index in 0..work.page_count() {
            let rects = work.search_page(page_index, phrase)?;
            if rects.is_empty() {
                continue;
            }
            debug!(
                "stage 2: phrase found on page {}: {} match(es)",
                page_index + 1,
                rects.len()
            );
            for rect in rects {
                work.add_highlight(page_index, rect, &options.style)?;
                hits.push(PageHighlight {
                    page: page_index as u32 + 1,
                    rect,
                });
            }
            break;
        }
    }
    Ok(())
}

/// Literal search over all pages, returning per-page match counts.
pub fn search_pages<D: DocumentOps>(doc: &D, query: &str) -> Result<Vec<PageMatch>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::EmptyInput("search query"));
    }

    let mut matches = Vec::new();
    for index in 0..doc.page_count() {
        let rects = doc.search_page(index, query)?;
        if !rects.is_empty() {
            matches.push(PageMatch {
                page: index as u32 + 1,
                count: rects.len(),
            });
        }
    }
    Ok(matches)
}
