// Publisher tests against a mock platform with a paused clock.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use test_utils::{MockPlatform, RecordingStore};
use tweetsmith_core::{Collection, PollDraft, PostKind, PostOptions};
use tweetsmith_social::Publisher;

const DELAY: Duration = Duration::from_secs(2);

fn chain() -> Vec<String> {
    vec![
        "🧵 Title".to_string(),
        "1️⃣ First tip".to_string(),
        "2️⃣ Second tip".to_string(),
    ]
}

fn publisher(platform: Arc<MockPlatform>, store: RecordingStore) -> Publisher {
    Publisher::new(platform, Arc::new(store), DELAY)
}

#[tokio::test(start_paused = true)]
async fn test_chain_links_replies_in_order() {
    let platform = Arc::new(MockPlatform::new_success());
    let store = RecordingStore::new();

    let published = publisher(platform.clone(), store.clone())
        .publish_chain(&chain())
        .await;

    assert_eq!(published.len(), 3);
    assert_eq!(published[0].parent_id(), &None);
    assert_eq!(published[1].parent_id().as_deref(), Some("tweet-0"));
    assert_eq!(published[2].parent_id().as_deref(), Some("tweet-1"));

    let posts = platform.posts();
    assert_eq!(posts[0].options, PostOptions::Standalone);
    assert_eq!(posts[2].options, PostOptions::ReplyTo("tweet-1".to_string()));
    assert_eq!(posts[1].text, "1️⃣ First tip");
}

#[tokio::test(start_paused = true)]
async fn test_chain_waits_between_posts() {
    let platform = Arc::new(MockPlatform::new_success());

    publisher(platform.clone(), RecordingStore::new())
        .publish_chain(&chain())
        .await;

    let posts = platform.posts();
    assert!(posts[1].at - posts[0].at >= DELAY);
    assert!(posts[2].at - posts[1].at >= DELAY);
}

#[tokio::test(start_paused = true)]
async fn test_chain_third_item_failure_keeps_two_item_prefix() {
    // Zero-based: item 2 is the third post.
    let platform = Arc::new(MockPlatform::new_failing_at(2));
    let store = RecordingStore::new();

    let published = publisher(platform.clone(), store.clone())
        .publish_chain(&chain())
        .await;

    assert_eq!(published.len(), 2);
    assert_eq!(published[1].external_id(), "tweet-1");
    assert_eq!(platform.posts().len(), 3);
    assert_eq!(store.records(Collection::Posts).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_chain_second_item_failure_never_attempts_third() {
    // One-based: item 2 is the second post.
    let platform = Arc::new(MockPlatform::new_failing_at(1));
    let store = RecordingStore::new();

    let published = publisher(platform.clone(), store.clone())
        .publish_chain(&chain())
        .await;

    assert_eq!(published.len(), 1);
    assert_eq!(platform.posts().len(), 2);
    assert_eq!(store.records(Collection::Posts).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_chain_records_index_and_parent() {
    let store = RecordingStore::new();

    publisher(Arc::new(MockPlatform::new_success()), store.clone())
        .publish_chain(&chain())
        .await;

    let records = store.records(Collection::Posts);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["thread_index"], 0);
    assert!(records[0].get("parent_id").is_none());
    assert_eq!(records[2]["thread_index"], 2);
    assert_eq!(records[2]["parent_id"], "tweet-1");
    assert_eq!(records[2]["external_id"], "tweet-2");
    assert_eq!(records[2]["kind"], "thread_item");
}

#[tokio::test]
async fn test_publish_single_failure_is_absent() {
    let store = RecordingStore::new();
    let result = publisher(Arc::new(MockPlatform::new_failing_at(0)), store.clone())
        .publish_single("hello")
        .await;

    assert!(result.is_none());
    assert!(store.records(Collection::Posts).is_empty());
}

#[tokio::test]
async fn test_publish_single_records_post() {
    let store = RecordingStore::new();
    let item = publisher(Arc::new(MockPlatform::new_success()), store.clone())
        .publish_single("hello")
        .await
        .expect("published");

    assert_eq!(item.external_id(), "tweet-0");
    assert_eq!(item.content(), "hello");
    let records = store.records(Collection::Posts);
    assert_eq!(records[0]["kind"], "single");
    assert_eq!(records[0]["text"], "hello");
}

#[tokio::test]
async fn test_publish_poll_sends_options() {
    let platform = Arc::new(MockPlatform::new_success());
    let poll = PollDraft::new("Pick one", vec!["A".into(), "B".into()], 1440);

    publisher(platform.clone(), RecordingStore::new())
        .publish_poll(&poll)
        .await
        .expect("published");

    let posts = platform.posts();
    assert_eq!(posts[0].text, "Pick one");
    match &posts[0].options {
        PostOptions::Poll {
            options,
            duration_minutes,
        } => {
            assert_eq!(options, &vec!["A", "B", "Option 3", "Option 4"]);
            assert_eq!(*duration_minutes, 1440);
        }
        other => panic!("expected poll options, got {other:?}"),
    }
}

#[tokio::test]
async fn test_publish_quote_records_quoted_id() {
    let store = RecordingStore::new();
    let item = publisher(Arc::new(MockPlatform::new_success()), store.clone())
        .publish_with("Worth a read", &PostOptions::Quote("99".into()), PostKind::Quote)
        .await
        .expect("published");

    assert_eq!(item.parent_id(), &None);
    let records = store.records(Collection::Posts);
    assert_eq!(records[0]["kind"], "quote");
    assert_eq!(records[0]["quoted_id"], "99");
    assert!(records[0].get("parent_id").is_none());
}

#[tokio::test]
async fn test_publish_reply_records_parent_only() {
    let store = RecordingStore::new();
    publisher(Arc::new(MockPlatform::new_success()), store.clone())
        .publish_with("Agreed", &PostOptions::ReplyTo("42".into()), PostKind::Reply)
        .await
        .expect("published");

    let records = store.records(Collection::Posts);
    assert_eq!(records[0]["parent_id"], "42");
    assert!(records[0].get("quoted_id").is_none());
}
