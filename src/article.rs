// src/article.rs
use serde::{Deserialize, Serialize};

/// Placeholder source label used when no outlet could be detected.
pub const SOURCE_OTHER: &str = "기타";

/// One candidate article flowing through the curation pipeline.
///
/// `trust_score` and `normalized_title` are assigned exactly once at ingest
/// time and never recomputed. `body_text` only exists during the relevance
/// stage and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub keyword: String,
    pub title: String,
    pub url: String,
    pub source: String,
    pub trust_score: i32,
    pub published_at: String,
    pub collected_at: String,
    #[serde(default)]
    pub summary: String,
    pub normalized_title: String,
    #[serde(skip)]
    pub body_text: Option<String>,
}

impl Article {
    /// Test/builder helper: a minimal article with everything else defaulted.
    pub fn stub(keyword: &str, title: &str, url: &str, normalized_title: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            source: SOURCE_OTHER.to_string(),
            trust_score: 50,
            published_at: String::new(),
            collected_at: String::new(),
            summary: String::new(),
            normalized_title: normalized_title.to_string(),
            body_text: None,
        }
    }
}
