// src/extract.rs
//! Best-effort article body extraction. Paywalled, unreachable, or
//! too-short pages all come back as `None`; nothing here is an error the
//! pipeline has to handle.

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::resolve::resolve_article_url;

/// Minimum extracted length to count as a usable body.
const MIN_BODY_CHARS: usize = 100;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[async_trait]
pub trait BodyExtractor: Send + Sync {
    async fn fetch_body(&self, url: &str) -> Option<String>;
}

/// Fetches the page over HTTP and reduces the HTML to plain text.
pub struct HttpExtractor {
    client: reqwest::Client,
}

impl HttpExtractor {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("building body extractor http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BodyExtractor for HttpExtractor {
    async fn fetch_body(&self, url: &str) -> Option<String> {
        if url.is_empty() {
            return None;
        }
        // Feed links are interstitials; fetch the publisher page instead.
        let target = resolve_article_url(&self.client, url).await;
        let resp = match self.client.get(&target).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(url = %target, error = ?e, "body fetch failed");
                return None;
            }
        };
        if !resp.status().is_success() {
            tracing::debug!(url = %target, status = %resp.status(), "body fetch non-success");
            return None;
        }
        let html = resp.text().await.ok()?;
        let text = html2text::from_read(html.as_bytes(), 100);
        let text = text.trim();
        if text.chars().count() < MIN_BODY_CHARS {
            return None;
        }
        Some(text.to_string())
    }
}
