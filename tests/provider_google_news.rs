// tests/provider_google_news.rs
use keyword_news_digest::ingest::providers::google_news::GoogleNewsProvider;
use keyword_news_digest::ingest::types::SearchProvider;

const FIXTURE: &str = include_str!("fixtures/google_news.xml");

#[tokio::test]
async fn fixture_parses_and_skips_malformed_items() {
    let provider = GoogleNewsProvider::from_fixture_str(FIXTURE);
    let items = provider.search("직업훈련").await.unwrap();

    // Four <item> elements, one without a link.
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].title, "직업훈련 예산 확대 발표");
    assert_eq!(items[0].link, "https://news.example.com/yna/1001");
    assert_eq!(items[0].source, "연합뉴스");
    // 00:30 UTC → 09:30 KST
    assert_eq!(items[0].published_at.as_deref(), Some("2025-01-13 09:30"));
}

#[tokio::test]
async fn empty_feed_yields_no_items() {
    let provider = GoogleNewsProvider::from_fixture_str(
        r#"<?xml version="1.0"?><rss version="2.0"><channel><title>t</title></channel></rss>"#,
    );
    let items = provider.search("직업훈련").await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn broken_xml_is_an_error_not_a_panic() {
    let provider = GoogleNewsProvider::from_fixture_str("<rss><channel><item>");
    assert!(provider.search("직업훈련").await.is_err());
}
