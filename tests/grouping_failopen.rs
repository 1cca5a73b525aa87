// tests/grouping_failopen.rs
use keyword_news_digest::ai::{GenClient, MockClient};
use keyword_news_digest::article::Article;
use keyword_news_digest::grouping::refine_group;

fn articles() -> Vec<Article> {
    vec![
        Article::stub("K", "기사 하나", "https://a/1", "하나"),
        Article::stub("K", "기사 둘", "https://a/2", "둘"),
        Article::stub("K", "기사 셋", "https://a/3", "셋"),
    ]
}

#[tokio::test]
async fn picks_representatives_by_index() {
    let client = MockClient::replying("1, 3");
    let out = refine_group(&client, articles()).await;
    let urls: Vec<&str> = out.iter().map(|a| a.url.as_str()).collect();
    assert_eq!(urls, vec!["https://a/1", "https://a/3"]);
}

#[tokio::test]
async fn unavailable_collaborator_is_a_no_op() {
    let client = MockClient::unavailable();
    let input = articles();
    let out = refine_group(&client, input.clone()).await;
    assert_eq!(out, input);
}

#[tokio::test]
async fn unparsable_reply_is_a_no_op() {
    let client = MockClient::replying("죄송하지만 판단할 수 없습니다");
    let input = articles();
    let out = refine_group(&client, input.clone()).await;
    assert_eq!(out, input);
}

#[tokio::test]
async fn out_of_range_only_reply_is_a_no_op() {
    let client = MockClient::replying("0, 99");
    let input = articles();
    let out = refine_group(&client, input.clone()).await;
    assert_eq!(out, input);
}

#[tokio::test]
async fn single_candidate_never_calls_the_collaborator() {
    struct PanickyClient;
    #[async_trait::async_trait]
    impl GenClient for PanickyClient {
        async fn generate(&self, _prompt: &str) -> Option<String> {
            panic!("must not be called for a single candidate");
        }
        fn provider_name(&self) -> &'static str {
            "panicky"
        }
    }

    let input = vec![Article::stub("K", "혼자", "https://a/1", "혼자")];
    let out = refine_group(&PanickyClient, input.clone()).await;
    assert_eq!(out, input);
}
