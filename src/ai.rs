// src/ai.rs
//! Text-generation client seam: provider abstraction + pacing wrapper.
//!
//! `None` from `generate` means "collaborator unavailable" — transport and
//! parse failures are absorbed at the call site so the pipeline can degrade
//! instead of aborting.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Trait object used by the grouping refiner and the summarizer.
#[async_trait::async_trait]
pub trait GenClient: Send + Sync {
    /// Send one prompt; `None` signals "treat as unavailable".
    async fn generate(&self, prompt: &str) -> Option<String>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

pub type DynGenClient = std::sync::Arc<dyn GenClient>;

/// Gemini provider (REST `generateContent`). Requires `GEMINI_API_KEY`;
/// without it every call returns `None`.
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(model_override: Option<&str>) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let http = reqwest::Client::builder()
            .user_agent("keyword-news-digest/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(30))
            .build()?;
        let model = model_override.unwrap_or("gemini-2.0-flash").to_string();
        Ok(Self {
            http,
            api_key,
            model,
        })
    }
}

#[async_trait::async_trait]
impl GenClient for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Option<String> {
        if self.api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY missing, text generation disabled");
            return None;
        }

        #[derive(Serialize)]
        struct Part<'a> {
            text: &'a str,
        }
        #[derive(Serialize)]
        struct Content<'a> {
            parts: Vec<Part<'a>>,
        }
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GenerationConfig {
            temperature: f32,
            max_output_tokens: u32,
        }
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Req<'a> {
            contents: Vec<Content<'a>>,
            generation_config: GenerationConfig,
        }
        #[derive(Deserialize)]
        struct Resp {
            candidates: Vec<Candidate>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            content: RespContent,
        }
        #[derive(Deserialize)]
        struct RespContent {
            parts: Vec<RespPart>,
        }
        #[derive(Deserialize)]
        struct RespPart {
            text: String,
        }

        let req = Req {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                max_output_tokens: 500,
            },
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let resp = match self.http.post(&url).json(&req).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = ?e, "gemini transport error");
                return None;
            }
        };
        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), "gemini non-success response");
            return None;
        }
        let body: Resp = resp.json().await.ok()?;
        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

/// Returns `None` always; used when AI features are switched off.
pub struct DisabledClient;

#[async_trait::async_trait]
impl GenClient for DisabledClient {
    async fn generate(&self, _prompt: &str) -> Option<String> {
        None
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic client for tests. Either repeats one fixed reply or plays
/// a script in order, answering `None` once the script runs out.
pub struct MockClient {
    fixed: Option<Option<String>>,
    script: Mutex<std::collections::VecDeque<Option<String>>>,
}

impl MockClient {
    /// Same reply for every call.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            fixed: Some(Some(reply.into())),
            script: Mutex::new(Default::default()),
        }
    }

    /// `None` for every call, like a provider that is down.
    pub fn unavailable() -> Self {
        Self {
            fixed: Some(None),
            script: Mutex::new(Default::default()),
        }
    }

    /// One entry per expected call, consumed in order.
    pub fn scripted(replies: Vec<Option<String>>) -> Self {
        Self {
            fixed: None,
            script: Mutex::new(replies.into()),
        }
    }
}

#[async_trait::async_trait]
impl GenClient for MockClient {
    async fn generate(&self, _prompt: &str) -> Option<String> {
        match &self.fixed {
            Some(reply) => reply.clone(),
            None => self.script.lock().await.pop_front().flatten(),
        }
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Pacing wrapper: a single in-flight call with a minimum delay between
/// consecutive calls. The external rate limit is the caller's problem, so it
/// lives in this wrapper rather than in any provider.
pub struct PacedClient<C: GenClient> {
    inner: C,
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl<C: GenClient> PacedClient<C> {
    pub fn new(inner: C, min_interval: Duration) -> Self {
        Self {
            inner,
            min_interval,
            last_call: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl<C: GenClient> GenClient for PacedClient<C> {
    async fn generate(&self, prompt: &str) -> Option<String> {
        // Holding the lock across the call serializes requests.
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        let out = self.inner.generate(prompt).await;
        *last = Some(Instant::now());
        out
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClient {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl GenClient for CountingClient {
        async fn generate(&self, _prompt: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Some("ok".to_string())
        }
        fn provider_name(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn paced_client_enforces_min_interval() {
        let paced = PacedClient::new(
            CountingClient {
                calls: AtomicUsize::new(0),
            },
            Duration::from_secs(6),
        );

        let t0 = Instant::now();
        assert_eq!(paced.generate("a").await.as_deref(), Some("ok"));
        assert_eq!(paced.generate("b").await.as_deref(), Some("ok"));
        assert!(t0.elapsed() >= Duration::from_secs(6));
    }

    #[tokio::test]
    async fn disabled_client_is_silent() {
        assert!(DisabledClient.generate("anything").await.is_none());
    }

    #[tokio::test]
    async fn mock_client_plays_its_script_in_order() {
        let mock = MockClient::scripted(vec![Some("first".to_string()), None]);
        assert_eq!(mock.generate("a").await.as_deref(), Some("first"));
        assert!(mock.generate("b").await.is_none());
        // Script exhausted.
        assert!(mock.generate("c").await.is_none());

        let fixed = MockClient::replying("ok");
        assert_eq!(fixed.generate("a").await.as_deref(), Some("ok"));
        assert_eq!(fixed.generate("b").await.as_deref(), Some("ok"));
    }
}
