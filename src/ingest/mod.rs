// src/ingest/mod.rs
//! Candidate collection: runs the search provider per enabled keyword and
//! assembles `Article` records. Trust score and normalized title are
//! computed here, exactly once per article.

pub mod providers;
pub mod types;

use std::time::Duration;

use chrono::{FixedOffset, Utc};

use crate::article::Article;
use crate::ingest::types::{FeedItem, SearchProvider};
use crate::normalize::comparison_key;
use crate::trust::TrustTable;

/// Pause between per-keyword feed requests.
const REQUEST_PAUSE: Duration = Duration::from_millis(300);

fn kst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("KST offset is valid")
}

/// Current time in KST, `%Y-%m-%d %H:%M`. Uniform across one ingestion batch.
pub fn kst_now_string() -> String {
    Utc::now().with_timezone(&kst()).format("%Y-%m-%d %H:%M").to_string()
}

/// Yesterday's date in KST, the digest's target date.
pub fn kst_target_date() -> String {
    (Utc::now().with_timezone(&kst()) - chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

/// Build one candidate from a feed item. The trust scan also sees the
/// feed-provided source name so outlets absent from URL and title still
/// match their table entry.
pub fn build_candidate(
    keyword: &str,
    item: FeedItem,
    trust: &TrustTable,
    all_keywords: &[String],
    collected_at: &str,
) -> Article {
    let scored_title = format!("{} {}", item.title, item.source);
    let (trust_score, source) = trust.score(&item.link, &scored_title, &item.source);

    Article {
        keyword: keyword.to_string(),
        normalized_title: comparison_key(&item.title, all_keywords),
        title: item.title,
        url: item.link,
        source,
        trust_score,
        published_at: item.published_at.unwrap_or_else(|| collected_at.to_string()),
        collected_at: collected_at.to_string(),
        summary: String::new(),
        body_text: None,
    }
}

/// Collect candidates for every enabled keyword, sequentially. A provider
/// failure for one keyword logs a warning and contributes nothing; the run
/// continues.
pub async fn collect(
    provider: &dyn SearchProvider,
    keywords: &[String],
    trust: &TrustTable,
) -> Vec<Article> {
    let collected_at = kst_now_string();
    let mut out = Vec::new();

    for (i, kw) in keywords.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(REQUEST_PAUSE).await;
        }
        match provider.search(kw).await {
            Ok(items) => {
                tracing::info!(keyword = %kw, count = items.len(), provider = provider.name(), "collected");
                out.extend(
                    items
                        .into_iter()
                        .map(|it| build_candidate(kw, it, trust, keywords, &collected_at)),
                );
            }
            Err(e) => {
                tracing::warn!(keyword = %kw, provider = provider.name(), error = ?e, "provider error");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::SOURCE_OTHER;

    #[test]
    fn candidate_fields_are_computed_once_from_feed_item() {
        let trust = TrustTable::default_seed();
        let keywords = vec!["일학습병행".to_string()];
        let item = FeedItem {
            title: "[단독] 일학습병행 확대 발표".to_string(),
            link: "https://example.com/a".to_string(),
            source: "연합뉴스".to_string(),
            published_at: Some("2025-01-13 09:30".to_string()),
        };

        let a = build_candidate("일학습병행", item, &trust, &keywords, "2025-01-14 07:00");
        assert_eq!(a.trust_score, 100);
        assert_eq!(a.source, "연합뉴스");
        assert_eq!(a.normalized_title, "확대 발표");
        assert_eq!(a.published_at, "2025-01-13 09:30");
        assert_eq!(a.collected_at, "2025-01-14 07:00");
        assert!(a.summary.is_empty());
    }

    #[test]
    fn missing_pub_date_falls_back_to_collection_time() {
        let trust = TrustTable::default_seed();
        let item = FeedItem {
            title: "제목".to_string(),
            link: "https://example.com/b".to_string(),
            source: String::new(),
            published_at: None,
        };
        let a = build_candidate("K", item, &trust, &[], "2025-01-14 07:00");
        assert_eq!(a.published_at, "2025-01-14 07:00");
        assert_eq!(a.source, SOURCE_OTHER);
        assert_eq!(a.trust_score, crate::trust::DEFAULT_TRUST_SCORE);
    }
}
