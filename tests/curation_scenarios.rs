// tests/curation_scenarios.rs
//! Hand-picked scenarios exercising the curation chain through the public API.

use std::collections::HashSet;

use keyword_news_digest::article::Article;
use keyword_news_digest::config::DEFAULT_SIMILARITY_THRESHOLD;
use keyword_news_digest::dedup::{dedup_articles, StoreIndex};
use keyword_news_digest::normalize::comparison_key;
use keyword_news_digest::rank::rank_and_cap;
use keyword_news_digest::similarity::is_similar_title;
use keyword_news_digest::trust::TrustTable;

fn candidate(keyword: &str, title: &str, url: &str, keywords: &[String]) -> Article {
    Article::stub(keyword, title, url, &comparison_key(title, keywords))
}

#[test]
fn same_story_across_outlets_keeps_first() {
    let keywords = vec!["일학습병행".to_string()];
    let raw = vec![
        candidate("일학습병행", "정부, 일학습병행 확대", "https://a/1", &keywords),
        candidate("일학습병행", "정부 일학습병행 확대 방안 발표", "https://b/2", &keywords),
    ];

    // The pair matches on the token branch at the default threshold.
    assert!(is_similar_title(
        &raw[0].normalized_title,
        &raw[1].normalized_title,
        DEFAULT_SIMILARITY_THRESHOLD
    ));

    let out = dedup_articles(raw, &StoreIndex::default(), DEFAULT_SIMILARITY_THRESHOLD);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].url, "https://a/1");
}

#[test]
fn stored_url_rejects_whatever_the_title_says() {
    let keywords = vec!["직업훈련".to_string()];
    let raw = vec![candidate(
        "직업훈련",
        "완전히 새로운 제목",
        "https://a.example/x",
        &keywords,
    )];
    let index = StoreIndex {
        titles: Vec::new(),
        urls: HashSet::from(["https://a.example/x".to_string()]),
    };
    assert!(dedup_articles(raw, &index, DEFAULT_SIMILARITY_THRESHOLD).is_empty());
}

#[test]
fn wire_service_scores_top_trust() {
    let table = TrustTable::default_seed();
    let (score, source) = table.score("https://yna.co.kr/article/1", "연합뉴스 단독보도", "");
    assert_eq!(score, 100);
    assert_eq!(source, "연합뉴스");
}

#[test]
fn cap_keeps_top_two_by_trust() {
    let mut a = Article::stub("K", "기사 60", "https://a/1", "기사 60");
    a.trust_score = 60;
    let mut b = Article::stub("K", "기사 90", "https://a/2", "기사 90");
    b.trust_score = 90;
    let mut c = Article::stub("K", "기사 75", "https://a/3", "기사 75");
    c.trust_score = 75;

    let out = rank_and_cap(vec![a, b, c], 2);
    let scores: HashSet<i32> = out.iter().map(|x| x.trust_score).collect();
    assert_eq!(scores, HashSet::from([90, 75]));
}

#[test]
fn dedup_output_never_shares_urls_with_store_or_itself() {
    let keywords = vec!["직업훈련".to_string()];
    let raw = vec![
        candidate("직업훈련", "반도체 수출 급증", "https://a/1", &keywords),
        candidate("직업훈련", "프로야구 개막전 매진", "https://a/1", &keywords),
        candidate("직업훈련", "국회 예산안 처리", "https://b/2", &keywords),
        candidate("직업훈련", "태풍 북상 소식", "https://c/3", &keywords),
    ];
    let index = StoreIndex {
        titles: Vec::new(),
        urls: HashSet::from(["https://c/3".to_string()]),
    };

    let out = dedup_articles(raw, &index, DEFAULT_SIMILARITY_THRESHOLD);
    let mut seen = HashSet::new();
    for article in &out {
        assert!(seen.insert(article.url.clone()));
        assert!(!index.urls.contains(&article.url));
    }
    assert_eq!(out.len(), 2);
}
