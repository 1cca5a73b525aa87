// src/similarity.rs
//! Decides whether two normalized titles cover the same story.
//!
//! Two independent tests, OR-combined:
//! - character ratio over the longest common matching blocks, with internal
//!   whitespace removed, against the configurable threshold. Catches
//!   near-identical phrasing and reordered blocks.
//! - token overlap (`|∩| / min(|A|,|B|)` over whitespace tokens) against a
//!   fixed 0.6 cutoff. Catches rephrased headlines where the character
//!   ratio is low.

use std::collections::HashSet;

/// Fixed token-overlap cutoff; deliberately independent of the configurable
/// character-ratio threshold.
pub const TOKEN_OVERLAP_CUTOFF: f64 = 0.6;

/// Sequence similarity as `2M / T`: `M` is the number of characters covered
/// by the longest common matching blocks, `T` the total length of both
/// inputs. Two empty strings rate 1.0.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

/// Longest common block first (earliest position on ties), then recurse
/// into the unmatched pieces on each side of it.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut best_len = 0;
    let mut best_a = 0;
    let mut best_b = 0;
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for i in 0..a.len() {
        for j in 0..b.len() {
            cur[j + 1] = if a[i] == b[j] { prev[j] + 1 } else { 0 };
            if cur[j + 1] > best_len {
                best_len = cur[j + 1];
                best_a = i + 1 - best_len;
                best_b = j + 1 - best_len;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    if best_len == 0 {
        return 0;
    }

    best_len
        + matched_chars(&a[..best_a], &b[..best_b])
        + matched_chars(&a[best_a + best_len..], &b[best_b + best_len..])
}

/// True when `a` and `b` (already-normalized comparison keys) denote the
/// same story. Empty input on either side never matches.
pub fn is_similar_title(a: &str, b: &str, threshold: f64) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let a_compact: String = a.split_whitespace().collect();
    let b_compact: String = b.split_whitespace().collect();
    if sequence_ratio(&a_compact, &b_compact) >= threshold {
        return true;
    }

    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return false;
    }

    let overlap = words_a.intersection(&words_b).count() as f64;
    let smaller = words_a.len().min(words_b.len()) as f64;
    overlap / smaller >= TOKEN_OVERLAP_CUTOFF
}
