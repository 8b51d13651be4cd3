//! String cleanup shared by the mapper and the naming engine.
//!
//! Display names keep their casing and punctuation; only `slugify` produces
//! the lower-case filesystem form.

use any_ascii::any_ascii;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Catalog disambiguator appended to same-named entities: "Goldie (12)".
pub static DUPLICATE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\(\d+\)$").unwrap());

/// Trailing article written catalog style: "Aphex Twin, The".
pub static TRAILING_ARTICLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*),\s+The$").unwrap());

pub static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Everything a slug may not contain (input is already lower-cased ASCII).
pub static SLUG_FORBIDDEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_()&\-]").unwrap());

pub static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").unwrap());

// ============================================================================
// NAME CLEANUP
// ============================================================================

/// Remove the catalog's duplicate-name suffix.
/// e.g., "Goldie (12)" → "Goldie"
pub fn strip_duplicate_suffix(name: &str) -> String {
    DUPLICATE_SUFFIX.replace(name, "").to_string()
}

/// Move a trailing ", The" to the front.
/// e.g., "Aphex Twin, The" → "The Aphex Twin"
pub fn reorder_trailing_article(name: &str) -> String {
    TRAILING_ARTICLE.replace(name, "The $1").to_string()
}

/// Full display-name cleanup for artist names: duplicate suffix first, then
/// the article. "Prodigy, The (3)" → "The Prodigy"
pub fn clean_name(name: &str) -> String {
    reorder_trailing_article(&strip_duplicate_suffix(name))
}

// ============================================================================
// FILESYSTEM FORM
// ============================================================================

pub fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0xFE20..=0xFE2F)
}

/// Fold Unicode text to lower-case ASCII.
/// e.g., "Beyoncé" → "beyonce", "Eißfeldt" → "eissfeldt"
pub fn fold_to_ascii(s: &str) -> String {
    let stripped: String = s.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    // Transliterate what decomposition left behind (ß, Cyrillic, CJK, ...)
    any_ascii(&stripped).to_lowercase()
}

/// Filesystem-safe form of a value.
///
/// Lower-cases, turns whitespace into underscores and drops everything
/// except letters, digits, `_`, `(`, `)`, `&` and `-`. A spaced hyphen
/// collapses to a bare one.
///
/// e.g., "Gigi D'Agostino" → "gigi_dagostino",
///       "Ladies & Gentlemen - The Best Of" → "ladies_&_gentlemen-the_best_of"
pub fn slugify(text: &str) -> String {
    let folded = fold_to_ascii(text);
    let underscored = WHITESPACE_RUN.replace_all(folded.trim(), "_");
    let kept = SLUG_FORBIDDEN.replace_all(&underscored, "");
    let collapsed = UNDERSCORE_RUN.replace_all(&kept, "_");
    collapsed.replace("_-_", "-").trim_matches('_').to_string()
}

// ============================================================================
// TESTS
// ============================================================================
