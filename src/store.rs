// src/store.rs
//! Persisted article memory: one JSON file holding everything accepted so
//! far. Loaded once per run as a read-only index for dedup; appended once at
//! the end with the curated set.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::article::Article;
use crate::dedup::StoreIndex;

pub struct ArticleStore {
    path: PathBuf,
}

impl ArticleStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Missing or corrupt file is an empty store, not an error.
    pub fn load(&self) -> Vec<Article> {
        match fs::read_to_string(&self.path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = ?e, "store unreadable, starting empty");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    /// Dedup index over everything stored.
    pub fn index(&self) -> StoreIndex {
        let stored = self.load();
        let mut titles = Vec::with_capacity(stored.len());
        let mut urls = HashSet::with_capacity(stored.len());
        for a in stored {
            titles.push(a.normalized_title);
            urls.insert(a.url);
        }
        StoreIndex { titles, urls }
    }

    /// Append the curated set. On normalized-title conflict the most
    /// recently processed entry wins; the file is rewritten atomically,
    /// newest collection first.
    pub fn append(&self, new: &[Article]) -> Result<usize> {
        let mut combined = self.load();
        combined.extend(new.iter().cloned());

        // Keep-last by normalized title: walk from the end, first hit wins.
        let mut seen = HashSet::new();
        let mut merged: Vec<Article> = combined
            .into_iter()
            .rev()
            .filter(|a| seen.insert(a.normalized_title.clone()))
            .collect();
        merged.reverse();

        merged.sort_by(|a, b| b.collected_at.cmp(&a.collected_at));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating store dir {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&merged).context("serializing store")?;
        let tmp = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&tmp)
            .with_context(|| format!("creating {}", tmp.display()))?;
        f.write_all(json.as_bytes()).context("writing store")?;
        fs::rename(&tmp, &self.path).context("replacing store file")?;

        Ok(merged.len())
    }
}
