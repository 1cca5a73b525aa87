// src/ingest/providers/google_news.rs
//! Google News RSS search provider.
//!
//! One request per keyword against the `when:1d` search feed. Items missing
//! a title or link are skipped; the batch continues.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{FixedOffset, TimeZone, Utc};
use once_cell::sync::OnceCell;
use quick_xml::de::from_str;
use regex::Regex;
use serde::Deserialize;
use time::{format_description::well_known::Rfc2822, OffsetDateTime, UtcOffset};

use crate::ingest::types::{FeedItem, SearchProvider};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}
#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source: Option<SourceTag>,
}
#[derive(Debug, Deserialize)]
struct SourceTag {
    #[serde(rename = "$text")]
    name: Option<String>,
}

/// RFC2822 `pubDate` → KST `%Y-%m-%d %H:%M`. Unparsable dates become `None`
/// so the caller can substitute the collection timestamp.
fn parse_pub_date(ts: &str) -> Option<String> {
    let unix = OffsetDateTime::parse(ts, &Rfc2822)
        .ok()?
        .to_offset(UtcOffset::UTC)
        .unix_timestamp();
    let kst = FixedOffset::east_opt(9 * 3600)?;
    let dt = Utc.timestamp_opt(unix, 0).single()?.with_timezone(&kst);
    Some(dt.format("%Y-%m-%d %H:%M").to_string())
}

/// Decode HTML entities and strip any markup Google leaves in titles.
fn clean_title(raw: &str) -> String {
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    let decoded = html_escape::decode_html_entities(raw).to_string();
    re_tags.replace_all(&decoded, "").trim().to_string()
}

pub struct GoogleNewsProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { client: reqwest::Client },
}

impl GoogleNewsProvider {
    /// Parse from a canned RSS document instead of the network (tests).
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    pub fn from_http() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("building google news http client")?;
        Ok(Self {
            mode: Mode::Http { client },
        })
    }

    fn search_url(keyword: &str) -> String {
        format!(
            "https://news.google.com/rss/search?q={}+when:1d&hl=ko&gl=KR&ceid=KR:ko",
            urlencoding::encode(keyword)
        )
    }

    fn parse_items(xml: &str) -> Result<Vec<FeedItem>> {
        let rss: Rss = from_str(xml).context("parsing google news rss xml")?;

        let mut out = Vec::with_capacity(rss.channel.item.len());
        for it in rss.channel.item {
            let (Some(title_raw), Some(link)) = (it.title, it.link) else {
                // Malformed item; skip it, keep the batch.
                continue;
            };
            let title = clean_title(&title_raw);
            let link = link.trim().to_string();
            if title.is_empty() || link.is_empty() {
                continue;
            }

            out.push(FeedItem {
                title,
                link,
                source: it
                    .source
                    .and_then(|s| s.name)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                published_at: it.pub_date.as_deref().and_then(parse_pub_date),
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl SearchProvider for GoogleNewsProvider {
    async fn search(&self, keyword: &str) -> Result<Vec<FeedItem>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_items(s),
            Mode::Http { client } => {
                let url = Self::search_url(keyword);
                let body = client
                    .get(&url)
                    .send()
                    .await
                    .context("google news rss get()")?
                    .error_for_status()
                    .context("google news rss status")?
                    .text()
                    .await
                    .context("google news rss .text()")?;
                Self::parse_items(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "google-news"
    }
}
