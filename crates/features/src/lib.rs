//! Feature extraction for gift matching.
//!
//! Provides pure functions for computing features used in ranking:
//! - Text normalization (case, diacritics, punctuation)
//! - Term extraction
//! - TF-IDF vectors and cosine similarity (see [`tfidf`])

use deunicode::deunicode;

pub mod tfidf;

pub use tfidf::{cosine_similarity, TermVector, TfIdfConfig, TfIdfVectorizer};

/// Shortest token that counts as a term.
pub const MIN_TERM_LEN: usize = 2;

/// Normalize text for comparison.
///
/// Lower-cases, drops everything that is not a word character or whitespace,
/// transliterates what is left to ASCII, and trims the ends. Inner whitespace
/// is kept as is, so `"Tea  Leaves"` and `"Tea Leaves"` stay distinct.
pub fn normalize_text(text: &str) -> String {
    // Symbols must go before transliteration, which spells them out ("♥" -> "hearts").
    let letters: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    // Transliteration can emit capitals ("Æ" -> "AE") and apostrophes, hence
    // the second pass.
    deunicode(&letters)
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize a possibly missing cell. Missing cells normalize to `""`.
pub fn normalize_cell(cell: Option<&str>) -> String {
    cell.map(normalize_text).unwrap_or_default()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split normalized text into terms.
///
/// Terms are whitespace-delimited tokens of at least [`MIN_TERM_LEN`]
/// characters.
pub fn extract_terms(normalized: &str) -> Vec<&str> {
    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
        .collect()
}

/// Build the similarity document for a list of raw gift names: each entry is
/// normalized on its own, then all are joined by single spaces.
pub fn build_document<'a, I>(raw_gifts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    raw_gifts
        .into_iter()
        .map(normalize_text)
        .collect::<Vec<_>>()
        .join(" ")
}
