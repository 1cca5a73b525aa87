//! Keyword News Digest — Binary Entrypoint
//! One batch run: collect today's candidates, curate, summarize, deliver.

use std::time::Duration;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyword_news_digest::ai::{DynGenClient, GeminiProvider, PacedClient};
use keyword_news_digest::config::AppConfig;
use keyword_news_digest::extract::HttpExtractor;
use keyword_news_digest::ingest::providers::google_news::GoogleNewsProvider;
use keyword_news_digest::pipeline::Pipeline;
use keyword_news_digest::report::EmailSender;
use keyword_news_digest::store::ArticleStore;
use keyword_news_digest::trust::TrustTable;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local runs; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AppConfig::load_default();
    let trust = TrustTable::load_from_file("config/trust.json");

    let gen: DynGenClient = std::sync::Arc::new(PacedClient::new(
        GeminiProvider::new(None)?,
        Duration::from_secs(config.settings.ai_cooldown_secs),
    ));

    let mailer = match EmailSender::try_from_env(&config.receiver_addrs()) {
        Ok(m) => Some(m),
        Err(e) => {
            tracing::info!(reason = %e, "email delivery disabled");
            None
        }
    };

    let pipeline = Pipeline {
        provider: Box::new(GoogleNewsProvider::from_http()?),
        gen,
        extractor: Box::new(HttpExtractor::new()?),
        store: ArticleStore::new("data/articles.json"),
        mailer,
        trust,
        config,
    };

    let outcome = pipeline.run().await?;
    tracing::info!(?outcome, "done");
    Ok(())
}
