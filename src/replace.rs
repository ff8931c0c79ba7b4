//! Anchor-based region replacement with adaptive font fitting.
//!
//! Locates a contiguous block range via two literal text anchors, erases
//! it, and re-inserts replacement text using the range's dominant font
//! profile, stepping down through font, size, and alignment candidates
//! until the text fits.

use log::{debug, info, warn};

use crate::backend::{DocumentOps, InsertOutcome};
use crate::error::{Error, Result};
use crate::model::{Alignment, Rect, TextBlock};
use crate::text::normalize_for_matching;

/// Options for anchored replacement.
///
/// Defaults reproduce the tuned production behavior; thresholds are
/// configuration, not constants.
#[derive(Debug, Clone)]
pub struct ReplaceOptions {
    /// Reject selections covering more than this share of the page's
    /// blocks
    pub max_selection_ratio: f32,

    /// Smallest font size tried for detected fonts and their variants
    pub min_font_size: f32,

    /// Smallest font size tried for the final generic fallback font
    pub fallback_min_font_size: f32,

    /// Span sizes outside this band are ignored during font detection
    pub min_observed_size: f32,
    /// Upper bound of the observed-size sanity band
    pub max_observed_size: f32,

    /// Font size assumed when no spans are observed in the target range
    pub default_font_size: f32,

    /// Font assumed when no font names are observed in the target range
    pub default_font_name: String,
}

impl ReplaceOptions {
    /// Create new replace options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection-ratio guard.
    pub fn with_max_selection_ratio(mut self, ratio: f32) -> Self {
        self.max_selection_ratio = ratio;
        self
    }

    /// Set the font-size floor for detected fonts.
    pub fn with_min_font_size(mut self, size: f32) -> Self {
        self.min_font_size = size;
        self
    }

    /// Set the font-size floor for the generic fallback font.
    pub fn with_fallback_min_font_size(mut self, size: f32) -> Self {
        self.fallback_min_font_size = size;
        self
    }

    /// Set the default font name.
    pub fn with_default_font(mut self, name: impl Into<String>) -> Self {
        self.default_font_name = name.into();
        self
    }
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            max_selection_ratio: 0.8,
            min_font_size: 6.0,
            fallback_min_font_size: 5.0,
            min_observed_size: 5.0,
            max_observed_size: 72.0,
            default_font_size: 12.0,
            default_font_name: "Helvetica".to_string(),
        }
    }
}

/// The dominant font of a page region: the most common size and name
/// among spans overlapping it.
#[derive(Debug, Clone, PartialEq)]
pub struct FontProfile {
    /// Detected font name
    pub name: String,
    /// Detected font size in points
    pub size: f32,
}

/// Replace the region between two anchors with new text, returning the
/// updated document bytes. The source handle is never mutated.
///
/// `page_number` is 1-based. Fails with [`Error::AnchorNotFound`],
/// [`Error::SelectionTooBroad`], or [`Error::NoFit`]; see the error
/// documentation for the caller remedy each implies.
pub fn replace_anchored<D: DocumentOps>(
    doc: &D,
    page_number: u32,
    start_anchor: &str,
    end_anchor: &str,
    replacement: &str,
    options: &ReplaceOptions,
) -> Result<Vec<u8>> {
    let start_norm = normalize_for_matching(start_anchor);
    let end_norm = normalize_for_matching(end_anchor);
    if start_norm.is_empty() {
        return Err(Error::EmptyInput("start anchor"));
    }
    if end_norm.is_empty() {
        return Err(Error::EmptyInput("end anchor"));
    }
    if replacement.trim().is_empty() {
        return Err(Error::EmptyInput("replacement text"));
    }

    let count = doc.page_count();
    if page_number == 0 || page_number as usize > count {
        return Err(Error::PageOutOfRange(page_number, count as u32));
    }
    let page_index = page_number as usize - 1;

    let layout = doc.page_layout(page_index)?;
    let blocks: Vec<&TextBlock> = layout.text_blocks().collect();
    debug!(
        "page {}: locating anchors among {} text blocks",
        page_number,
        blocks.len()
    );

    let (start_idx, end_idx) = locate_anchor_range(
        &blocks,
        &start_norm,
        &end_norm,
        start_anchor,
        end_anchor,
        page_number,
    )?;

    // A single-block page is always a legitimate target; the breadth
    // guard applies once there is something else on the page to protect.
    let selected = end_idx - start_idx + 1;
    if blocks.len() >= 2 && selected as f32 > blocks.len() as f32 * options.max_selection_ratio {
        warn!(
            "selection of {} blocks exceeds {:.0}% of page {} ({} blocks)",
            selected,
            options.max_selection_ratio * 100.0,
            page_number,
            blocks.len()
        );
        return Err(Error::SelectionTooBroad {
            selected,
            total: blocks.len(),
            page: page_number,
        });
    }

    let rect = Rect::union_all(blocks[start_idx..=end_idx].iter().map(|b| b.bbox))
        .expect("anchor range is non-empty");
    debug!(
        "blocks {}..={} union to {:.1}x{:.1}pt at ({:.1}, {:.1})",
        start_idx,
        end_idx,
        rect.width(),
        rect.height(),
        rect.x0,
        rect.y0
    );

    let profile = detect_font_profile(&blocks, &rect, options);
    info!(
        "font profile for replacement: {} at {}pt",
        profile.name, profile.size
    );

    // The erased rectangle in the working copy is the only insertion
    // target from here on.
    let mut work = doc.duplicate()?;
    work.redact(page_index, rect)?;

    let mut attempts = 0usize;
    let mut unavailable: Option<String> = None;
    for candidate in fit_candidates(&profile, options) {
        if unavailable.as_deref() == Some(candidate.font.as_str()) {
            continue;
        }
        attempts += 1;

        let outcome = work.insert_text_box(
            page_index,
            rect,
            replacement,
            &candidate.font,
            candidate.size,
            candidate.alignment,
        )?;
        match outcome {
            InsertOutcome::Fit => {
                info!(
                    "inserted replacement with '{}' at {}pt ({:?}) after {} attempts",
                    candidate.font, candidate.size, candidate.alignment, attempts
                );
                return work.save();
            }
            InsertOutcome::Overflow => {
                debug!(
                    "no fit with '{}' at {}pt ({:?})",
                    candidate.font, candidate.size, candidate.alignment
                );
            }
            InsertOutcome::FontUnavailable => {
                debug!("font '{}' unavailable, skipping its sizes", candidate.font);
                unavailable = Some(candidate.font.clone());
            }
        }
    }

    warn!(
        "replacement text ({} chars) exhausted all candidates for blocks {}..={} on page {}",
        replacement.len(),
        start_idx,
        end_idx,
        page_number
    );
    Err(Error::NoFit {
        page: page_number,
        start_block: start_idx,
        end_block: end_idx,
        attempts,
    })
}

/// Resolve the anchor pair to an inclusive block index range.
///
/// Fast path: block-by-block scan, requiring the end anchor in a block
/// after the start anchor's. Fallback: search the space-joined
/// concatenation of all block texts and map character offsets back to
/// block indices (one separator character between blocks).
fn locate_anchor_range(
    blocks: &[&TextBlock],
    start_norm: &str,
    end_norm: &str,
    start_anchor: &str,
    end_anchor: &str,
    page_number: u32,
) -> Result<(usize, usize)> {
    let block_texts: Vec<String> = blocks
        .iter()
        .map(|b| normalize_for_matching(&b.text()))
        .collect();

    let mut start_idx = None;
    let mut end_idx = None;
    for (i, text) in block_texts.iter().enumerate() {
        if start_idx.is_none() && text.contains(start_norm) {
            start_idx = Some(i);
        } else if let Some(s) = start_idx {
            if i > s && text.contains(end_norm) {
                end_idx = Some(i);
                break;
            }
        }
    }

    if let (Some(s), Some(e)) = (start_idx, end_idx) {
        debug!("anchors found block-wise: {}..={}", s, e);
        return Ok((s, e));
    }

    // Concatenated fallback: handles anchors inside one block and anchors
    // spanning block boundaries.
    let concatenated = block_texts.join(" ");

    let start_pos = concatenated
        .find(start_norm)
        .ok_or_else(|| Error::AnchorNotFound {
            anchor: start_anchor.to_string(),
            page: page_number,
        })?;
    let after_start = start_pos + start_norm.len();
    let end_pos = concatenated[after_start..]
        .find(end_norm)
        .map(|p| p + after_start)
        .ok_or_else(|| Error::AnchorNotFound {
            anchor: end_anchor.to_string(),
            page: page_number,
        })?;

    let mut cursor = 0usize;
    let mut start_idx = None;
    let mut end_idx = None;
    for (i, text) in block_texts.iter().enumerate() {
        let len = text.len();
        if start_idx.is_none() && start_pos < cursor + len {
            start_idx = Some(i);
        }
        if end_idx.is_none() && end_pos < cursor + len {
            end_idx = Some(i);
            break;
        }
        cursor += len + 1;
    }

    let start_idx = start_idx.ok_or_else(|| Error::AnchorNotFound {
        anchor: start_anchor.to_string(),
        page: page_number,
    })?;
    let end_idx = end_idx.ok_or_else(|| Error::AnchorNotFound {
        anchor: end_anchor.to_string(),
        page: page_number,
    })?;

    debug!(
        "anchors found in concatenated text (offsets {}, {}), mapped to blocks {}..={}",
        start_pos, end_pos, start_idx, end_idx
    );
    Ok((start_idx, end_idx))
}

/// Detect the dominant font among spans of blocks overlapping `rect`.
///
/// The most common size wins over the largest, so headers and footnotes
/// inside the range do not skew the choice toward display sizes.
fn detect_font_profile(
    blocks: &[&TextBlock],
    rect: &Rect,
    options: &ReplaceOptions,
) -> FontProfile {
    let mut sizes: Vec<f32> = Vec::new();
    let mut names: Vec<String> = Vec::new();

    for block in blocks {
        if !block.bbox.intersects(rect) {
            continue;
        }
        for line in &block.lines {
            for span in &line.spans {
                if span.font_size >= options.min_observed_size
                    && span.font_size <= options.max_observed_size
                {
                    sizes.push(span.font_size);
                    names.push(span.font_name.clone());
                }
            }
        }
    }

    debug!("font detection: {} span samples in range", sizes.len());

    let size = mode_first_seen(&sizes).unwrap_or(options.default_font_size);
    let name = mode_first_seen(&names).unwrap_or_else(|| options.default_font_name.clone());
    FontProfile { name, size }
}

/// Most frequent value; ties broken by first-encountered order.
fn mode_first_seen<T: PartialEq + Clone>(items: &[T]) -> Option<T> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        if let Some(entry) = counts.iter_mut().find(|(v, _)| v == item) {
            entry.1 += 1;
        } else {
            counts.push((item.clone(), 1));
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        match &best {
            Some((_, best_count)) if count <= *best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

#[derive(Debug, Clone)]
struct Candidate {
    font: String,
    size: f32,
    alignment: Alignment,
}

#[derive(Debug, Clone)]
struct CandidateFont {
    name: String,
    is_fallback: bool,
}

/// Fonts to try, in order: the detected name, its case variants, then the
/// generic family fallback.
fn candidate_fonts(detected: &str) -> Vec<CandidateFont> {
    let mut names = vec![detected.to_string()];
    for variant in [
        title_case(detected),
        detected.to_lowercase(),
        detected.to_uppercase(),
    ] {
        if !names.contains(&variant) {
            names.push(variant);
        }
    }

    let mut fonts: Vec<CandidateFont> = names
        .into_iter()
        .map(|name| CandidateFont {
            name,
            is_fallback: false,
        })
        .collect();
    fonts.push(CandidateFont {
        name: generic_fallback(detected).to_string(),
        is_fallback: true,
    });
    fonts
}

/// Map a font name to a generic standard family by keyword.
fn generic_fallback(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if lower.contains("times")
        || lower.contains("georgia")
        || lower.contains("garamond")
        || lower.contains("serif")
    {
        "Times-Roman"
    } else if lower.contains("courier") || lower.contains("mono") {
        "Courier"
    } else {
        "Helvetica"
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// The ordered, lazily-produced (font, size, alignment) search sequence.
///
/// Sizes step down by 1pt from the detected size to the floor (6pt, or
/// 5pt for the generic fallback); each size tries justified then left.
fn fit_candidates(
    profile: &FontProfile,
    options: &ReplaceOptions,
) -> impl Iterator<Item = Candidate> {
    let fonts = candidate_fonts(&profile.name);
    let start_size = profile.size;
    let min_size = options.min_font_size;
    let fallback_min = options.fallback_min_font_size;

    fonts.into_iter().flat_map(move |font| {
        let floor = if font.is_fallback {
            fallback_min
        } else {
            min_size
        };
        let name = font.name;
        std::iter::successors(Some(start_size), |size| Some(size - 1.0))
            .take_while(move |size| *size >= floor)
            .flat_map(move |size| {
                let name = name.clone();
                [Alignment::Justify, Alignment::Left]
                    .into_iter()
                    .map(move |alignment| Candidate {
                        font: name.clone(),
                        size,
                        alignment,
                    })
            })
    })
}
