// src/grouping.rs
//! AI grouping refiner: a second dedup pass that asks the text-generation
//! collaborator to cluster remaining candidates by real-world event and keep
//! one representative per cluster.
//!
//! Fail-open by contract: any empty, unparsable or errored response returns
//! the input unchanged. Losing articles silently is worse than keeping
//! near-duplicates.

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::ai::GenClient;
use crate::article::Article;

fn build_prompt(articles: &[Article]) -> String {
    let titles: Vec<String> = articles
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {}", i + 1, a.title))
        .collect();
    format!(
        "아래 뉴스 제목들을 읽고, 서로 다른 언론사에서 보도했지만 사실상 같은 \
         소식이나 사건을 다루는 기사들을 그룹화해줘.\n\
         각 그룹 내에서는 가장 대표성이 있는 기사 번호 하나만 선택해.\n\
         최종적으로 선택된 기사 번호들만 쉼표로 구분해서 보내줘. 다른 설명은 하지 마.\n\
         예시: 1, 4, 7\n\n\
         뉴스 제목 리스트:\n{}",
        titles.join("\n")
    )
}

/// Extract 1-based indices from the model reply, mapped to 0-based, bounds
/// checked, first-seen order preserved.
fn parse_indices(response: &str, len: usize) -> Vec<usize> {
    static RE_NUM: OnceCell<Regex> = OnceCell::new();
    let re = RE_NUM.get_or_init(|| Regex::new(r"\d+").unwrap());

    let mut seen = vec![false; len];
    let mut out = Vec::new();
    for m in re.find_iter(response) {
        let Ok(n) = m.as_str().parse::<usize>() else {
            continue;
        };
        if n == 0 || n > len {
            continue;
        }
        let idx = n - 1;
        if !seen[idx] {
            seen[idx] = true;
            out.push(idx);
        }
    }
    out
}

/// Refine one keyword's candidates. No-op for groups of one.
pub async fn refine_group(client: &dyn GenClient, articles: Vec<Article>) -> Vec<Article> {
    if articles.len() <= 1 {
        return articles;
    }

    tracing::info!(count = articles.len(), "ai grouping pass");
    let Some(response) = client.generate(&build_prompt(&articles)).await else {
        tracing::warn!("grouping response unavailable, keeping all candidates");
        return articles;
    };

    let indices = parse_indices(&response, articles.len());
    if indices.is_empty() {
        tracing::warn!(%response, "grouping response unparsable, keeping all candidates");
        return articles;
    }

    let mut slots: Vec<Option<Article>> = articles.into_iter().map(Some).collect();
    indices
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

/// Apply the refiner independently per keyword, preserving configured
/// keyword order. Groups of ≤ 1 skip the collaborator entirely.
pub async fn refine_by_keyword(
    client: &dyn GenClient,
    articles: Vec<Article>,
    keywords: &[String],
) -> Vec<Article> {
    let mut refined = Vec::with_capacity(articles.len());
    for kw in keywords {
        let group: Vec<Article> = articles
            .iter()
            .filter(|a| &a.keyword == kw)
            .cloned()
            .collect();
        if group.is_empty() {
            continue;
        }
        refined.extend(refine_group(client, group).await);
    }
    refined
}
