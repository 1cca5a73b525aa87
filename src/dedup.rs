// src/dedup.rs
//! Local duplicate removal across three overlapping sets: previously stored
//! articles, articles already accepted in this run, and the raw candidate.
//!
//! Order-preserving: the first occurrence of a story wins. Membership checks
//! use a `HashSet` for URLs; output order only ever follows input order.

use std::collections::HashSet;

use crate::article::Article;
use crate::similarity::is_similar_title;

/// Read-only view of the persisted article memory, built once per run.
#[derive(Debug, Default, Clone)]
pub struct StoreIndex {
    pub titles: Vec<String>,
    pub urls: HashSet<String>,
}

/// Admit only first-seen stories.
///
/// Per candidate, in order: exact URL vs stored memory, similar title vs
/// stored memory, exact URL vs the accepted batch, similar title vs the
/// accepted batch. O(n·m), fine at daily per-keyword volumes.
pub fn dedup_articles(raw: Vec<Article>, index: &StoreIndex, threshold: f64) -> Vec<Article> {
    let mut accepted: Vec<Article> = Vec::with_capacity(raw.len());

    'candidates: for article in raw {
        if index.urls.contains(&article.url) {
            tracing::debug!(url = %article.url, "duplicate: url already stored");
            continue;
        }

        for stored_title in &index.titles {
            if is_similar_title(&article.normalized_title, stored_title, threshold) {
                tracing::debug!(title = %article.title, "duplicate: similar to stored title");
                continue 'candidates;
            }
        }

        for kept in &accepted {
            if article.url == kept.url
                || is_similar_title(&article.normalized_title, &kept.normalized_title, threshold)
            {
                tracing::debug!(title = %article.title, "duplicate: matches earlier candidate");
                continue 'candidates;
            }
        }

        accepted.push(article);
    }

    accepted
}
