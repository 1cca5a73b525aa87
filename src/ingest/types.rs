// src/ingest/types.rs
use anyhow::Result;

/// One raw feed item as delivered by a search provider. Title is already
/// entity-decoded and tag-stripped; `published_at` is KST `%Y-%m-%d %H:%M`
/// when the feed carried a parsable date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub source: String,
    pub published_at: Option<String>,
}

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch current items for one search keyword.
    async fn search(&self, keyword: &str) -> Result<Vec<FeedItem>>;
    fn name(&self) -> &'static str;
}
