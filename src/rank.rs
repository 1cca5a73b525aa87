// src/rank.rs
//! Trust ranking, per-keyword capping, and the keyword relevance re-check.

use std::collections::HashMap;

use crate::article::Article;

/// Stable sort by trust score descending, then keep at most
/// `max_per_keyword` per keyword — the top-N *by trust*, not an arbitrary N.
pub fn rank_and_cap(mut articles: Vec<Article>, max_per_keyword: usize) -> Vec<Article> {
    articles.sort_by(|a, b| b.trust_score.cmp(&a.trust_score));

    let mut counts: HashMap<String, usize> = HashMap::new();
    articles
        .into_iter()
        .filter(|a| {
            let n = counts.entry(a.keyword.clone()).or_insert(0);
            *n += 1;
            *n <= max_per_keyword
        })
        .collect()
}

/// Re-validate that the search keyword actually appears in the article.
///
/// With a fetched body, body or title suffices. When the body fetch failed,
/// a title match alone keeps the article — body absence is not itself
/// disqualifying.
pub fn is_relevant(keyword: &str, title: &str, body: Option<&str>) -> bool {
    match body {
        Some(text) => text.contains(keyword) || title.contains(keyword),
        None => title.contains(keyword),
    }
}

/// Relevance pass over candidates whose `body_text` is already populated.
/// Excluded articles are logged, not silently dropped.
pub fn relevance_filter(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|a| {
            let keep = is_relevant(&a.keyword, &a.title, a.body_text.as_deref());
            if !keep {
                tracing::info!(keyword = %a.keyword, title = %a.title, "excluded: keyword not in body or title");
            }
            keep
        })
        .collect()
}

/// Composed rank → cap → relevance pass, for inputs that already carry
/// their body text.
pub fn filter_and_rank(articles: Vec<Article>, max_per_keyword: usize) -> Vec<Article> {
    relevance_filter(rank_and_cap(articles, max_per_keyword))
}
