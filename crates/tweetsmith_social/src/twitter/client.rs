//! Twitter API v2 client.

use super::json_models::{
    ApiProblem, ApiResponse, CreateTweetRequest, LikeData, LikeRequest, PollSettings, ReplySettings,
    TweetData, UserData,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};
use tweetsmith_core::{Account, PostOptions, TimelineExclude, TimelineItem};
use tweetsmith_error::{PlatformError, PlatformErrorKind, PlatformResult};
use tweetsmith_interface::SocialPlatform;

const TWITTER_API_BASE: &str = "https://api.twitter.com/2";

/// Bounds the v2 timeline endpoint accepts for `max_results`.
const TIMELINE_MIN_RESULTS: u32 = 5;
const TIMELINE_MAX_RESULTS: u32 = 100;

/// Client for the Twitter/X API v2.
///
/// Authenticates with an OAuth 2.0 user-context bearer token, which lets the
/// bot post, like, and read timelines as its own account. The authenticated
/// account is fetched once and cached.
///
/// # Example
///
/// ```no_run
/// use tweetsmith_interface::SocialPlatform;
/// use tweetsmith_social::TwitterClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TwitterClient::new(std::env::var("TWITTER_BEARER_TOKEN")?);
/// let me = client.current_account().await?;
/// println!("Authenticated as @{}", me.username());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TwitterClient {
    client: Client,
    bearer_token: String,
    base_url: String,
    me: OnceCell<Account>,
}

impl TwitterClient {
    /// Create a client against the public API.
    pub fn new(bearer_token: impl Into<String>) -> Self {
        debug!("Creating new Twitter client");
        Self {
            client: Client::new(),
            bearer_token: bearer_token.into(),
            base_url: TWITTER_API_BASE.to_string(),
            me: OnceCell::new(),
        }
    }

    /// Point the client at another API base (e.g. a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> PlatformResult<ApiResponse<T>> {
        let response = request
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Http(e.to_string())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Http(e.to_string())))?;

        if !status.is_success() {
            return Err(PlatformError::new(PlatformErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        serde_json::from_str(&body)
            .map_err(|e| PlatformError::new(PlatformErrorKind::Parse(e.to_string())))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PlatformResult<T> {
        let envelope = self.envelope::<T>(request).await?;
        match envelope.data {
            Some(data) => Ok(data),
            None => Err(problem_error(&envelope.errors)),
        }
    }
}

fn problem_error(problems: &[ApiProblem]) -> PlatformError {
    match problems.first() {
        Some(problem) if problem.is_not_found() => {
            PlatformError::new(PlatformErrorKind::NotFound(problem.describe()))
        }
        Some(problem) => PlatformError::new(PlatformErrorKind::Rejected(problem.describe())),
        None => PlatformError::new(PlatformErrorKind::Parse(
            "response carried neither data nor errors".to_string(),
        )),
    }
}

/// Clamp a requested timeline size into the range the API accepts.
pub(crate) fn timeline_page_size(max: u32) -> u32 {
    max.clamp(TIMELINE_MIN_RESULTS, TIMELINE_MAX_RESULTS)
}

/// Comma-separated `exclude` query value.
pub(crate) fn exclude_param(exclude: &[TimelineExclude]) -> String {
    exclude
        .iter()
        .map(|e| e.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl SocialPlatform for TwitterClient {
    #[instrument(skip(self, text), fields(text_len = text.chars().count()))]
    async fn post_item(&self, text: &str, options: &PostOptions) -> PlatformResult<String> {
        let mut body = CreateTweetRequest {
            text,
            ..Default::default()
        };
        match options {
            PostOptions::Standalone => {}
            PostOptions::ReplyTo(id) => {
                body.reply = Some(ReplySettings {
                    in_reply_to_tweet_id: id.as_str(),
                })
            }
            PostOptions::Quote(id) => body.quote_tweet_id = Some(id.as_str()),
            PostOptions::Poll {
                options,
                duration_minutes,
            } => {
                body.poll = Some(PollSettings {
                    options: options.as_slice(),
                    duration_minutes: *duration_minutes,
                })
            }
        }

        let tweet: TweetData = self
            .send(self.client.post(self.url("tweets")).json(&body))
            .await?;
        debug!(external_id = %tweet.id, "Tweet created");
        Ok(tweet.id)
    }

    #[instrument(skip(self))]
    async fn like(&self, item_id: &str) -> PlatformResult<()> {
        let me = self.current_account().await?;
        let result: LikeData = self
            .send(
                self.client
                    .post(self.url(&format!("users/{}/likes", me.id())))
                    .json(&LikeRequest { tweet_id: item_id }),
            )
            .await?;

        if result.liked {
            Ok(())
        } else {
            Err(PlatformError::new(PlatformErrorKind::Rejected(format!(
                "like of {item_id} was not applied"
            ))))
        }
    }

    #[instrument(skip(self, exclude))]
    async fn recent_items(
        &self,
        account_id: &str,
        max: u32,
        exclude: &[TimelineExclude],
    ) -> PlatformResult<Vec<TimelineItem>> {
        let mut query = vec![("max_results", timeline_page_size(max).to_string())];
        if !exclude.is_empty() {
            query.push(("exclude", exclude_param(exclude)));
        }

        let request = self
            .client
            .get(self.url(&format!("users/{account_id}/tweets")))
            .query(&query);

        let envelope = self.envelope::<Vec<TweetData>>(request).await?;
        let tweets = match envelope.data {
            Some(tweets) => tweets,
            // An account with no matching items answers without `data`.
            None if envelope.errors.is_empty() => Vec::new(),
            None => return Err(problem_error(&envelope.errors)),
        };

        debug!(count = tweets.len(), "Fetched timeline");
        Ok(tweets
            .into_iter()
            .take(max as usize)
            .map(|t| TimelineItem::new(t.id, t.text))
            .collect())
    }

    #[instrument(skip(self))]
    async fn account_by_handle(&self, handle: &str) -> PlatformResult<String> {
        let handle = handle.trim_start_matches('@');
        let user: UserData = self
            .send(self.client.get(self.url(&format!("users/by/username/{handle}"))))
            .await?;
        Ok(user.id)
    }

    async fn current_account(&self) -> PlatformResult<Account> {
        self.me
            .get_or_try_init(|| async {
                let user: UserData = self.send(self.client.get(self.url("users/me"))).await?;
                info!(username = %user.username, "Authenticated Twitter account");
                Ok::<_, PlatformError>(Account::new(user.id, user.username, user.name))
            })
            .await
            .cloned()
    }

    fn platform_name(&self) -> &str {
        "twitter"
    }
}
