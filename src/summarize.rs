// src/summarize.rs
//! Three-bullet article summaries via the text-generation collaborator.

use crate::ai::GenClient;

/// Shown in the digest when no summary could be generated.
pub const FALLBACK_SUMMARY: &str = "- 요약을 생성할 수 없습니다.";

/// Body excerpt passed to the model.
const MAX_BODY_CHARS: usize = 3500;

fn build_prompt(body: &str) -> String {
    let excerpt: String = body.chars().take(MAX_BODY_CHARS).collect();
    format!(
        "아래 뉴스 기사를 읽고 중요한 내용을 딱 3문장으로 요약해줘.\n\
         조건:\n\
         1. 각 문장은 가독성 좋게 불렛포인트(-)로 시작할 것.\n\
         2. '핵심:', '배경:' 같은 말머리 단어는 절대 넣지 말고 내용만 작성할 것.\n\
         3. 한국어로 정중하게 작성할 것.\n\n\
         기사 내용:\n{excerpt}"
    )
}

/// `None` when the collaborator is unavailable or returns nothing.
pub async fn summarize_article(client: &dyn GenClient, body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    client.generate(&build_prompt(body)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_truncates_on_char_boundary() {
        let body = "글".repeat(MAX_BODY_CHARS + 500);
        let prompt = build_prompt(&body);
        let excerpt = prompt.split("기사 내용:\n").nth(1).unwrap();
        assert_eq!(excerpt.chars().count(), MAX_BODY_CHARS);
        assert!(excerpt.chars().all(|c| c == '글'));
    }

    #[tokio::test]
    async fn empty_body_skips_the_collaborator() {
        let out = summarize_article(&crate::ai::DisabledClient, "   ").await;
        assert!(out.is_none());
    }
}
