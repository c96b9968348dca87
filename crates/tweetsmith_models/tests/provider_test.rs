// Tests for the content provider fallback chain using mock backends.

mod test_utils;

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tweetsmith_core::{Collection, PromptKey, SourceBackend, parse_poll};
use tweetsmith_error::BackendErrorKind;
use tweetsmith_models::{ContentProvider, FallbackTable, GenerationSettings, PromptTemplates};
use test_utils::{MockBackend, RecordingStore};

fn quota_error() -> BackendErrorKind {
    BackendErrorKind::Api {
        status: 429,
        message: "You exceeded your current quota".to_string(),
    }
}

#[tokio::test]
async fn test_primary_success_skips_secondary() -> anyhow::Result<()> {
    let primary = Arc::new(MockBackend::new_success("openai", "  \"Ship it.\" - Someone  "));
    let secondary = Arc::new(MockBackend::new_success("gemini", "unused"));
    let store = RecordingStore::new();

    let provider = ContentProvider::builder()
        .primary(primary.clone(), GenerationSettings::new(500, 0.7))
        .secondary(secondary.clone(), GenerationSettings::new(300, 0.9))
        .store(Arc::new(store.clone()))
        .build()?;

    let content = provider.generate(PromptKey::Quote).await;

    assert_eq!(content.text(), "\"Ship it.\" - Someone");
    assert_eq!(*content.source_backend(), SourceBackend::Primary);
    assert_eq!(content.provider(), "openai");
    assert_eq!(primary.call_count(), 1);
    assert_eq!(secondary.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_primary_failure_uses_secondary_settings() -> anyhow::Result<()> {
    let primary = Arc::new(MockBackend::new_error("openai", quota_error()));
    let secondary = Arc::new(MockBackend::new_success("gemini", "Breaking: Rust everywhere"));
    let store = RecordingStore::new();

    let provider = ContentProvider::builder()
        .primary(primary.clone(), GenerationSettings::new(500, 0.7))
        .secondary(secondary.clone(), GenerationSettings::new(300, 0.9))
        .store(Arc::new(store.clone()))
        .build()?;

    let content = provider.generate(PromptKey::NewsItem).await;

    assert_eq!(*content.source_backend(), SourceBackend::Secondary);
    assert_eq!(content.text(), "Breaking: Rust everywhere");
    let requests = secondary.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].max_tokens, 300);
    assert!((requests[0].temperature - 0.9).abs() < f32::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_both_backends_failing_returns_fallback() -> anyhow::Result<()> {
    let primary = Arc::new(MockBackend::new_error("openai", quota_error()));
    let secondary = Arc::new(MockBackend::new_error(
        "gemini",
        BackendErrorKind::Http("connection refused".to_string()),
    ));
    let store = RecordingStore::new();

    let provider = ContentProvider::builder()
        .primary(primary.clone(), GenerationSettings::default())
        .secondary(secondary.clone(), GenerationSettings::default())
        .store(Arc::new(store.clone()))
        .rng(StdRng::seed_from_u64(42))
        .build()?;

    let content = provider.generate(PromptKey::Quote).await;

    assert!(content.is_fallback());
    assert!(!content.text().is_empty());
    assert!(
        FallbackTable::default()
            .samples(PromptKey::Quote)
            .contains(content.text())
    );
    assert_eq!(primary.call_count(), 1);
    assert_eq!(secondary.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_empty_response_falls_through() -> anyhow::Result<()> {
    let primary = Arc::new(MockBackend::new_success("openai", "   \n "));
    let store = RecordingStore::new();

    let provider = ContentProvider::builder()
        .primary(primary, GenerationSettings::default())
        .store(Arc::new(store))
        .build()?;

    let content = provider.generate(PromptKey::Thread).await;
    assert!(content.is_fallback());
    assert!(!content.text().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_fallback_poll_parses_to_four_options() -> anyhow::Result<()> {
    let provider = ContentProvider::builder()
        .store(Arc::new(RecordingStore::new()))
        .build()?;

    let content = provider.generate(PromptKey::Poll).await;
    let poll = parse_poll(content.text(), 1440);
    assert_eq!(poll.options().len(), 4);
    assert!(!poll.question().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_generation_is_recorded() -> anyhow::Result<()> {
    let primary = Arc::new(MockBackend::new_success("openai", "hello"));
    let store = RecordingStore::new();

    let provider = ContentProvider::builder()
        .primary(primary, GenerationSettings::default())
        .store(Arc::new(store.clone()))
        .build()?;

    provider.generate(PromptKey::Quote).await;
    provider.generate(PromptKey::Poll).await;

    let records = store.records(Collection::Generations);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["text"], "hello");
    assert_eq!(records[0]["backend"], "primary");
    assert_eq!(records[0]["prompt_key"], "quote");
    assert_eq!(records[1]["prompt_key"], "poll");
    Ok(())
}

#[tokio::test]
async fn test_fallback_generation_is_recorded() -> anyhow::Result<()> {
    let store = RecordingStore::new();
    let provider = ContentProvider::builder()
        .primary(
            Arc::new(MockBackend::new_error("openai", BackendErrorKind::EmptyResponse)),
            GenerationSettings::default(),
        )
        .store(Arc::new(store.clone()))
        .build()?;

    provider.generate(PromptKey::NewsItem).await;

    let records = store.records(Collection::Generations);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["backend"], "fallback");
    assert_eq!(records[0]["provider"], "static");
    Ok(())
}

#[tokio::test]
async fn test_engagement_prompt_includes_source_text() -> anyhow::Result<()> {
    let primary = Arc::new(MockBackend::new_success("openai", "Nice one!"));
    let provider = ContentProvider::builder()
        .primary(primary.clone(), GenerationSettings::default())
        .store(Arc::new(RecordingStore::new()))
        .build()?;

    provider
        .generate_for(PromptKey::EngagementReply, Some("Just released v2.0"))
        .await;

    let requests = primary.requests();
    assert!(requests[0].prompt.contains("Just released v2.0"));
    assert!(!requests[0].prompt.contains("{text}"));
    assert_eq!(requests[0].system.as_deref(), Some(PromptTemplates::default().system.as_str()));
    Ok(())
}

#[test]
fn test_build_without_store_fails() {
    assert!(ContentProvider::builder().build().is_err());
}
