// src/report.rs
//! Digest rendering and SMTP delivery.
//!
//! Rendering is pure string assembly; delivery degrades to a skipped stage
//! when SMTP credentials or receivers are absent.

use anyhow::{Context, Result};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use crate::article::Article;
use crate::config::AppConfig;

fn badge_color(trust_score: i32) -> &'static str {
    if trust_score >= 90 {
        "#27ae60"
    } else if trust_score >= 70 {
        "#3498db"
    } else {
        "#95a5a6"
    }
}

/// HTML digest: articles grouped by keyword in configured order, sorted by
/// trust within each group.
pub fn render_digest(target_date: &str, articles: &[Article], config: &AppConfig) -> String {
    let mut html = format!(
        r#"<div style="font-family: 'Malgun Gothic', sans-serif; background-color: #f4f4f4; padding: 20px; color: #333;">
<div style="max-width: 700px; margin: 0 auto; background-color: #ffffff; padding: 30px; border-radius: 10px;">
<div style="text-align: center; margin-bottom: 30px; border-bottom: 2px solid #555; padding-bottom: 20px;">
<h1 style="color: #2c3e50; font-size: 24px; margin: 0;">{target_date} 뉴스 리포트</h1>
<p style="color: #7f8c8d; font-size: 14px; margin-top: 10px;">총 <span style="color:#e67e22; font-weight:bold;">{}</span>건의 기사 요약</p>
</div>
"#,
        articles.len()
    );

    for kw in config.enabled_keywords() {
        let mut group: Vec<&Article> = articles.iter().filter(|a| a.keyword == kw).collect();
        if group.is_empty() {
            continue;
        }
        group.sort_by(|a, b| b.trust_score.cmp(&a.trust_score));
        let kw_color = config.keyword_color(&kw);

        html.push_str(&format!(
            r#"<div style="margin-bottom: 30px;">
<div style="background-color: {kw_color}; color: white; padding: 6px 15px; display: inline-block; border-radius: 15px; font-weight: bold; font-size: 16px; margin-bottom: 15px;"># {kw}</div>
"#
        ));

        for a in group {
            let summary_html = a.summary.replace('\n', "<br>");
            let badge = badge_color(a.trust_score);
            html.push_str(&format!(
                r#"<div style="border: 1px solid #e0e0e0; border-radius: 8px; padding: 20px; margin-bottom: 15px;">
<a href="{url}" target="_blank" style="font-size: 18px; font-weight: bold; color: #2c3e50; text-decoration: none;">{title}</a>
<span style="background-color: {badge}; color: white; padding: 2px 8px; border-radius: 10px; font-size: 11px; margin-left: 10px;">{source}</span>
<div style="font-size: 12px; color: #95a5a6; margin: 8px 0 15px 0;">{date}</div>
<div style="background-color: #f9f9f9; padding: 15px; border-left: 4px solid {kw_color}; color: #555; font-size: 14px; line-height: 1.6;">{summary}</div>
</div>
"#,
                url = a.url,
                title = a.title,
                source = a.source,
                date = a.published_at,
                summary = summary_html,
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str(
        r#"<div style="text-align: center; margin-top: 40px; font-size: 12px; color: #bdc3c7; border-top: 1px solid #eee; padding-top: 20px;">Automated daily digest</div>
</div>
</div>
"#,
    );
    html
}

pub struct EmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    receivers: Vec<Mailbox>,
}

impl EmailSender {
    /// Build from `SMTP_HOST` (default Gmail), `EMAIL_USER`, `EMAIL_PASSWORD`
    /// and the configured receivers. Anything missing is an `Err` the caller
    /// downgrades to "delivery skipped".
    pub fn try_from_env(receiver_addrs: &[String]) -> Result<Self> {
        let host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let user = std::env::var("EMAIL_USER").context("EMAIL_USER missing")?;
        let pass = std::env::var("EMAIL_PASSWORD").context("EMAIL_PASSWORD missing")?;
        if receiver_addrs.is_empty() {
            anyhow::bail!("no receivers configured");
        }

        let from: Mailbox = user.parse().context("EMAIL_USER is not a mail address")?;
        let receivers = receiver_addrs
            .iter()
            .map(|r| r.parse().with_context(|| format!("invalid receiver {r}")))
            .collect::<Result<Vec<Mailbox>>>()?;

        let creds = Credentials::new(user, pass);
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
            .context("invalid SMTP_HOST")?
            .credentials(creds)
            .build();

        Ok(Self {
            mailer,
            from,
            receivers,
        })
    }

    pub async fn send_digest(&self, subject: &str, html_body: String) -> Result<()> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(subject)
            .header(header::ContentType::TEXT_HTML);
        for to in &self.receivers {
            builder = builder.to(to.clone());
        }
        let msg = builder.body(html_body).context("build digest email")?;
        self.mailer.send(msg).await.context("send digest email")?;
        tracing::info!(receivers = self.receivers.len(), "digest email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use crate::config::AppConfig;

    #[test]
    fn digest_groups_by_keyword_and_orders_by_trust() {
        let config = AppConfig::default_seed();
        let mut low = Article::stub("직업훈련", "낮은 신뢰 기사", "https://a/1", "낮은");
        low.trust_score = 60;
        let mut high = Article::stub("직업훈련", "높은 신뢰 기사", "https://a/2", "높은");
        high.trust_score = 95;

        let html = render_digest("2025-01-14", &[low, high], &config);
        let hi_pos = html.find("높은 신뢰 기사").unwrap();
        let lo_pos = html.find("낮은 신뢰 기사").unwrap();
        assert!(hi_pos < lo_pos, "higher trust renders first");
        assert!(html.contains("# 직업훈련"));
        assert!(html.contains("2025-01-14 뉴스 리포트"));
    }

    #[test]
    fn empty_keyword_groups_are_omitted() {
        let config = AppConfig::default_seed();
        let a = Article::stub("직업훈련", "기사", "https://a/1", "기사");
        let html = render_digest("2025-01-14", &[a], &config);
        assert!(!html.contains("# 고용노동부"));
    }

    #[test]
    fn badge_tiers() {
        assert_eq!(badge_color(95), "#27ae60");
        assert_eq!(badge_color(75), "#3498db");
        assert_eq!(badge_color(50), "#95a5a6");
    }

    #[serial_test::serial]
    #[test]
    fn missing_credentials_is_an_error_not_a_panic() {
        std::env::remove_var("EMAIL_USER");
        std::env::remove_var("EMAIL_PASSWORD");
        assert!(EmailSender::try_from_env(&["x@example.com".to_string()]).is_err());
    }
}
