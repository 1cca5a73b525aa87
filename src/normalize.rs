// src/normalize.rs
//! Title normalization for duplicate detection.
//!
//! Headlines carry outlet branding (`[연합뉴스]`, `(종합)`) and punctuation that
//! inflate similarity between unrelated stories and deflate it between
//! identical ones. Comparison always runs on the normalized form.

use once_cell::sync::OnceCell;
use regex::Regex;

/// Strip bracketed outlet tags and punctuation from a headline.
///
/// Keeps Hangul, Latin alphanumerics and whitespace; everything else goes.
/// Idempotent: normalizing an already-normalized title is a no-op.
pub fn normalize_title(title: &str) -> String {
    static RE_BRACKETS: OnceCell<Regex> = OnceCell::new();
    let re_brackets = RE_BRACKETS.get_or_init(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").unwrap());
    let out = re_brackets.replace_all(title, "");

    static RE_PUNCT: OnceCell<Regex> = OnceCell::new();
    let re_punct = RE_PUNCT.get_or_init(|| Regex::new(r"[^가-힣a-zA-Z0-9\s]").unwrap());
    let out = re_punct.replace_all(&out, "");

    out.trim().to_string()
}

/// Normalized title with every configured keyword removed.
///
/// The search keyword appears in nearly every hit for that keyword, so leaving
/// it in would make unrelated stories look similar to each other.
pub fn comparison_key(title: &str, keywords: &[String]) -> String {
    let mut key = normalize_title(title);
    for kw in keywords {
        if !kw.is_empty() {
            key = key.replace(kw.as_str(), "");
        }
    }
    key.trim().to_string()
}
