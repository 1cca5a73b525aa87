// src/config.rs
//! Run configuration: keywords, receivers, and pipeline settings.
//!
//! Loaded from `config.json` or `config.toml` (both formats accepted);
//! anything missing or unreadable falls back to built-in defaults so a bare
//! checkout still runs.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "NEWS_CONFIG_PATH";
pub const ENV_RECEIVERS: &str = "EMAIL_RECEIVER";

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;
pub const DEFAULT_MAX_PER_KEYWORD: usize = 50;
pub const DEFAULT_AI_COOLDOWN_SECS: u64 = 6;

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordEntry {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReceiverEntry {
    pub email: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_max_per_keyword")]
    pub max_articles_per_keyword: usize,
    #[serde(default = "default_cooldown")]
    pub ai_cooldown_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_articles_per_keyword: DEFAULT_MAX_PER_KEYWORD,
            ai_cooldown_secs: DEFAULT_AI_COOLDOWN_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub keywords: Vec<KeywordEntry>,
    #[serde(default)]
    pub receivers: Vec<ReceiverEntry>,
    #[serde(default)]
    pub settings: Settings,
}

fn default_color() -> String {
    "#333333".to_string()
}
fn default_true() -> bool {
    true
}
fn default_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}
fn default_max_per_keyword() -> usize {
    DEFAULT_MAX_PER_KEYWORD
}
fn default_cooldown() -> u64 {
    DEFAULT_AI_COOLDOWN_SECS
}

impl AppConfig {
    /// Built-in keyword set, used when no config file is present.
    pub fn default_seed() -> Self {
        let keywords = [
            ("일학습병행", "#3498db"),
            ("직업훈련", "#e67e22"),
            ("고용노동부", "#7f8c8d"),
            ("한국산업인력공단", "#2c3e50"),
        ]
        .into_iter()
        .map(|(name, color)| KeywordEntry {
            name: name.to_string(),
            color: color.to_string(),
            enabled: true,
        })
        .collect();

        Self {
            keywords,
            receivers: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// Load from an explicit path. TOML or JSON, picked by extension with a
    /// fallback attempt at the other format.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            tracing::warn!(path = %path.display(), "config unreadable, using defaults");
            return Self::default_seed();
        };
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match Self::parse(&content, &ext) {
            Some(cfg) => cfg,
            None => {
                tracing::warn!(path = %path.display(), "config unparsable, using defaults");
                Self::default_seed()
            }
        }
    }

    /// Load using `$NEWS_CONFIG_PATH`, then `config.json`, then
    /// `config.toml`, then built-in defaults.
    pub fn load_default() -> Self {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            return Self::load_from(&PathBuf::from(p));
        }
        for candidate in ["config.json", "config.toml"] {
            let p = PathBuf::from(candidate);
            if p.exists() {
                return Self::load_from(&p);
            }
        }
        Self::default_seed()
    }

    fn parse(content: &str, hint_ext: &str) -> Option<Self> {
        if hint_ext == "toml" {
            if let Ok(cfg) = toml::from_str::<Self>(content) {
                return Some(cfg);
            }
        }
        if let Ok(cfg) = serde_json::from_str::<Self>(content) {
            return Some(cfg);
        }
        if hint_ext != "toml" {
            if let Ok(cfg) = toml::from_str::<Self>(content) {
                return Some(cfg);
            }
        }
        None
    }

    pub fn enabled_keywords(&self) -> Vec<String> {
        self.keywords
            .iter()
            .filter(|k| k.enabled)
            .map(|k| k.name.clone())
            .collect()
    }

    pub fn keyword_color(&self, keyword: &str) -> &str {
        self.keywords
            .iter()
            .find(|k| k.name == keyword)
            .map(|k| k.color.as_str())
            .unwrap_or("#333333")
    }

    /// Digest receivers: `$EMAIL_RECEIVER` (comma-separated) merged with
    /// enabled config entries, first occurrence wins.
    pub fn receiver_addrs(&self) -> Vec<String> {
        let env_raw = std::env::var(ENV_RECEIVERS).unwrap_or_default();
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for addr in env_raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .chain(
                self.receivers
                    .iter()
                    .filter(|r| r.enabled)
                    .map(|r| r.email.trim().to_string()),
            )
        {
            if !addr.is_empty() && seen.insert(addr.clone()) {
                out.push(addr);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_config_parses_with_defaults_filled() {
        let json = r#"{
            "keywords": [
                {"name": "직업훈련"},
                {"name": "꺼진키워드", "enabled": false}
            ],
            "settings": {"similarity_threshold": 0.7}
        }"#;
        let cfg = AppConfig::parse(json, "json").unwrap();
        assert_eq!(cfg.enabled_keywords(), vec!["직업훈련".to_string()]);
        assert!((cfg.settings.similarity_threshold - 0.7).abs() < 1e-9);
        assert_eq!(cfg.settings.max_articles_per_keyword, DEFAULT_MAX_PER_KEYWORD);
    }

    #[test]
    fn toml_config_parses() {
        let tml = r##"
            [[keywords]]
            name = "고용노동부"
            color = "#7f8c8d"

            [settings]
            max_articles_per_keyword = 3
        "##;
        let cfg = AppConfig::parse(tml, "toml").unwrap();
        assert_eq!(cfg.enabled_keywords(), vec!["고용노동부".to_string()]);
        assert_eq!(cfg.settings.max_articles_per_keyword, 3);
    }

    #[test]
    fn garbage_config_is_rejected() {
        assert!(AppConfig::parse("definitely not config", "json").is_none());
    }

    #[serial_test::serial]
    #[test]
    fn receivers_merge_env_and_config() {
        std::env::set_var(ENV_RECEIVERS, "a@example.com, b@example.com");
        let cfg = AppConfig {
            keywords: Vec::new(),
            receivers: vec![
                ReceiverEntry {
                    email: "b@example.com".to_string(),
                    enabled: true,
                },
                ReceiverEntry {
                    email: "c@example.com".to_string(),
                    enabled: true,
                },
                ReceiverEntry {
                    email: "d@example.com".to_string(),
                    enabled: false,
                },
            ],
            settings: Settings::default(),
        };
        let addrs = cfg.receiver_addrs();
        std::env::remove_var(ENV_RECEIVERS);
        assert_eq!(addrs, vec!["a@example.com", "b@example.com", "c@example.com"]);
    }
}
