// Live Twitter checks (read-only).
//
// Ignored unless built with `--features api`; the token comes from the
// environment or `.env`.

use tweetsmith_core::TimelineExclude;
use tweetsmith_interface::SocialPlatform;
use tweetsmith_social::TwitterClient;

fn client() -> anyhow::Result<TwitterClient> {
    let _ = dotenvy::dotenv();
    Ok(TwitterClient::new(std::env::var("TWITTER_BEARER_TOKEN")?))
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_current_account() -> anyhow::Result<()> {
    let account = client()?.current_account().await?;
    assert!(!account.id().is_empty());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_recent_items_of_public_account() -> anyhow::Result<()> {
    let client = client()?;
    let id = client.account_by_handle("rustlang").await?;
    let items = client
        .recent_items(&id, 5, &[TimelineExclude::Retweets, TimelineExclude::Replies])
        .await?;
    assert!(items.len() <= 5);
    Ok(())
}
