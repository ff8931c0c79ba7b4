//! Text normalization and phrase utilities.
//!
//! Anchors and search passages arrive with arbitrary whitespace (line
//! wraps, soft hyphens survive upstream extraction); matching happens on
//! normalized forms so that newlines and runs of spaces are treated
//! uniformly.

use unicode_normalization::UnicodeNormalization;

/// Collapse all whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an anchor or block text for anchor matching: whitespace
/// collapsed, case folded.
pub fn normalize_for_matching(text: &str) -> String {
    collapse_whitespace(&text.to_lowercase())
}

/// Normalize a highlight passage: Unicode compatibility decomposition,
/// then whitespace collapse. Case is preserved (literal page search is
/// case-insensitive on the backend side).
pub fn normalize_passage(text: &str) -> String {
    let decomposed: String = text.nfkd().collect();
    collapse_whitespace(&decomposed)
}

/// Split a passage into sentence candidates at ". " boundaries, keeping
/// only sentences longer than `min_len` characters. Order is preserved
/// and duplicates are dropped.
pub fn sentence_phrases(text: &str, min_len: usize) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();
    for sentence in text.split(". ") {
        let s = sentence.trim();
        if s.len() > min_len && !phrases.iter().any(|p| p == s) {
            phrases.push(s.to_string());
        }
    }
    phrases
}

/// Build overlapping word-window chunks of roughly `window` words,
/// stepped by at least `min_step` words (one third of the text length
/// when larger). Chunks shorter than `min_chunk_len` characters are
/// dropped.
pub fn word_windows(text: &str, window: usize, min_step: usize, min_chunk_len: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut chunks = Vec::new();
    if words.len() <= window {
        return chunks;
    }

    let step = min_step.max(words.len() / 3);
    // Stop early enough that every chunk keeps most of a window.
    let last_start = words.len().saturating_sub(window.saturating_sub(2));
    let mut i = 0;
    while i < last_start {
        let chunk = words[i..(i + window).min(words.len())].join(" ");
        if chunk.len() > min_chunk_len && !chunks.iter().any(|c| c == &chunk) {
            chunks.push(chunk);
        }
        i += step;
    }
    chunks
}
