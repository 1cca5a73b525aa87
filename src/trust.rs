// src/trust.rs
//! # Trust table
//!
//! Maps an article's URL/title text to an outlet credibility score using an
//! injected, immutable, **ordered** list of (outlet pattern, score) pairs.
//!
//! - First pattern found as a substring of `url + " " + title` wins; table
//!   order is the tie-break when outlet names overlap as substrings.
//! - Loads from a JSON config file, falling back to a built-in seed.
//! - No match falls back to the feed-provided source hint, or `기타`.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::article::SOURCE_OTHER;

pub const DEFAULT_TRUST_SCORE: i32 = 50;

/// Ordered outlet reputation table.
#[derive(Debug, Clone, Deserialize)]
pub struct TrustTable {
    /// (outlet pattern, score) in priority order.
    pub entries: Vec<(String, i32)>,
    /// Score when no pattern matches.
    #[serde(default = "default_score")]
    pub default_score: i32,
}

fn default_score() -> i32 {
    DEFAULT_TRUST_SCORE
}

impl TrustTable {
    /// Load the table from a JSON file. Falls back to `default_seed()` on
    /// any read or parse error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|_| Self::default_seed()),
            Err(_) => Self::default_seed(),
        }
    }

    /// Score an article by scanning `url + " " + title` for the first outlet
    /// pattern in table order. Returns the score and the detected outlet
    /// name; on no match, the feed-provided `source_hint` (or `기타` when the
    /// hint is itself empty or the placeholder).
    pub fn score(&self, url: &str, title: &str, source_hint: &str) -> (i32, String) {
        let haystack = format!("{url} {title}");
        for (pattern, score) in &self.entries {
            if !pattern.is_empty() && haystack.contains(pattern.as_str()) {
                return (*score, pattern.clone());
            }
        }
        let hint = source_hint.trim();
        let detected = if hint.is_empty() || hint == SOURCE_OTHER {
            SOURCE_OTHER.to_string()
        } else {
            hint.to_string()
        };
        (self.default_score, detected)
    }

    /// Built-in seed of Korean outlets, tiered by credibility. Order matters:
    /// earlier entries win when outlet names overlap as substrings.
    pub fn default_seed() -> Self {
        let entries = [
            // Tier 1: wire services / public broadcasters
            ("연합뉴스", 100),
            ("연합뉴스TV", 100),
            ("KBS", 95),
            ("MBC", 95),
            ("SBS", 95),
            ("YTN", 90),
            ("JTBC", 90),
            // Tier 2: national dailies
            ("조선일보", 85),
            ("중앙일보", 85),
            ("동아일보", 85),
            ("한겨레", 85),
            ("경향신문", 85),
            ("한국일보", 85),
            ("국민일보", 80),
            // Tier 3: business press
            ("매일경제", 80),
            ("한국경제", 80),
            ("서울경제", 75),
            ("머니투데이", 75),
            ("이데일리", 75),
            ("파이낸셜뉴스", 75),
            // Tier 4: online outlets
            ("뉴스1", 70),
            ("뉴시스", 70),
            ("노컷뉴스", 65),
            ("오마이뉴스", 65),
        ]
        .into_iter()
        .map(|(name, score)| (name.to_string(), score))
        .collect();

        Self {
            entries,
            default_score: DEFAULT_TRUST_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_outlet_in_title() {
        let t = TrustTable::default_seed();
        let (score, source) = t.score("https://yna.co.kr/article/1", "연합뉴스 단독보도", "");
        assert_eq!((score, source.as_str()), (100, "연합뉴스"));
    }

    #[test]
    fn matches_outlet_in_url() {
        let t = TrustTable::default_seed();
        let (score, source) = t.score("https://n.news.naver.com/JTBC/123", "무제", "");
        assert_eq!((score, source.as_str()), (90, "JTBC"));
    }

    #[test]
    fn falls_back_to_hint_then_placeholder() {
        let t = TrustTable::default_seed();
        let (score, source) = t.score("https://a.example/x", "무관한 제목", "어느지역신문");
        assert_eq!((score, source.as_str()), (DEFAULT_TRUST_SCORE, "어느지역신문"));

        let (score, source) = t.score("https://a.example/x", "무관한 제목", "  ");
        assert_eq!((score, source.as_str()), (DEFAULT_TRUST_SCORE, SOURCE_OTHER));
    }

    #[test]
    fn table_order_breaks_substring_ties() {
        // 연합뉴스TV contains 연합뉴스; the earlier entry wins by design.
        let t = TrustTable::default_seed();
        let (score, source) = t.score("", "연합뉴스TV 보도", "");
        assert_eq!(score, 100);
        assert_eq!(source, "연합뉴스");
    }

    #[test]
    fn bad_config_file_falls_back_to_seed() {
        let t = TrustTable::load_from_file("/nonexistent/trust.json");
        assert_eq!(t.default_score, DEFAULT_TRUST_SCORE);
        assert!(!t.entries.is_empty());
    }
}
