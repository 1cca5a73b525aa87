// src/pipeline.rs
//! End-to-end curation run: collect → dedup → AI grouping → rank/cap →
//! relevance → summarize → report → persist.
//!
//! Strictly sequential; collaborator failures degrade stage by stage and the
//! run always ends with either a curated set or an informational stop. The
//! only fatal error left is failing to persist the final result.

use anyhow::{Context, Result};

use crate::ai::DynGenClient;
use crate::config::AppConfig;
use crate::dedup::dedup_articles;
use crate::extract::BodyExtractor;
use crate::grouping::refine_by_keyword;
use crate::ingest::types::SearchProvider;
use crate::rank::{rank_and_cap, relevance_filter};
use crate::report::{render_digest, EmailSender};
use crate::store::ArticleStore;
use crate::summarize::{summarize_article, FALLBACK_SUMMARY};
use crate::ingest;
use crate::trust::TrustTable;

/// How one run ended. None of these are errors.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Feeds produced nothing for any enabled keyword.
    NoCandidates,
    /// Everything collected was a duplicate of known coverage.
    NothingNew,
    /// Survivors all failed the keyword relevance re-check.
    NothingRelevant,
    Completed {
        collected: usize,
        curated: usize,
    },
}

pub struct Pipeline {
    pub config: AppConfig,
    pub trust: TrustTable,
    pub provider: Box<dyn SearchProvider>,
    pub gen: DynGenClient,
    pub extractor: Box<dyn BodyExtractor>,
    pub store: ArticleStore,
    pub mailer: Option<EmailSender>,
}

impl Pipeline {
    pub async fn run(&self) -> Result<RunOutcome> {
        let target_date = ingest::kst_target_date();
        let keywords = self.config.enabled_keywords();
        let threshold = self.config.settings.similarity_threshold;
        let index = self.store.index();

        tracing::info!(%target_date, keywords = keywords.len(), "collecting candidates");
        let raw = ingest::collect(self.provider.as_ref(), &keywords, &self.trust).await;
        if raw.is_empty() {
            tracing::info!("no candidates collected");
            return Ok(RunOutcome::NoCandidates);
        }
        let collected = raw.len();

        tracing::info!(collected, threshold, "local dedup");
        let unique = dedup_articles(raw, &index, threshold);

        tracing::info!(unique = unique.len(), "ai grouping refinement");
        let refined = refine_by_keyword(self.gen.as_ref(), unique, &keywords).await;

        let capped = rank_and_cap(refined, self.config.settings.max_articles_per_keyword);
        if capped.is_empty() {
            tracing::info!("nothing new after dedup and ranking");
            return Ok(RunOutcome::NothingNew);
        }
        tracing::info!(collected, kept = capped.len(), "ranked and capped");

        // Bodies are fetched only for cap survivors; a failed fetch skips
        // just that article's body, not the article.
        let mut with_bodies = Vec::with_capacity(capped.len());
        for mut article in capped {
            article.body_text = self.extractor.fetch_body(&article.url).await;
            with_bodies.push(article);
        }
        let mut relevant = relevance_filter(with_bodies);
        if relevant.is_empty() {
            tracing::info!("no relevant articles left");
            return Ok(RunOutcome::NothingRelevant);
        }

        tracing::info!(count = relevant.len(), "summarizing");
        for article in &mut relevant {
            let summary = match article.body_text.as_deref() {
                Some(body) => summarize_article(self.gen.as_ref(), body).await,
                None => None,
            };
            article.summary = summary.unwrap_or_else(|| FALLBACK_SUMMARY.to_string());
            article.body_text = None;
        }

        match &self.mailer {
            Some(mailer) => {
                let subject = format!("[뉴스리포트] {target_date} 주요 뉴스 알림");
                let html = render_digest(&target_date, &relevant, &self.config);
                if let Err(e) = mailer.send_digest(&subject, html).await {
                    tracing::warn!(error = ?e, "digest delivery failed, continuing");
                }
            }
            None => tracing::info!("email not configured, delivery skipped"),
        }

        let stored_total = self
            .store
            .append(&relevant)
            .context("persisting curated set")?;
        tracing::info!(curated = relevant.len(), stored_total, "run complete");

        Ok(RunOutcome::Completed {
            collected,
            curated: relevant.len(),
        })
    }
}
