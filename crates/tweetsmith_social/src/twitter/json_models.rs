//! JSON bodies for the Twitter API v2 endpoints.
//!
//! Responses carry either `data` or an `errors` array; both are optional so a
//! partial failure still decodes.

use serde::{Deserialize, Serialize};

/// Body of `POST /2/tweets`.
#[derive(Debug, Default, Serialize)]
pub(crate) struct CreateTweetRequest<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplySettings<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_tweet_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<PollSettings<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplySettings<'a> {
    pub in_reply_to_tweet_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PollSettings<'a> {
    pub options: &'a [String],
    pub duration_minutes: u32,
}

/// Body of `POST /2/users/:id/likes`.
#[derive(Debug, Serialize)]
pub(crate) struct LikeRequest<'a> {
    pub tweet_id: &'a str,
}

/// Envelope shared by every v2 response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiProblem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default, rename = "type")]
    pub problem_type: Option<String>,
}

impl ApiProblem {
    pub fn describe(&self) -> String {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => format!("{title}: {detail}"),
            (Some(title), None) => title.clone(),
            (None, Some(detail)) => detail.clone(),
            (None, None) => self
                .problem_type
                .clone()
                .unwrap_or_else(|| "unknown error".to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.title.as_deref() == Some("Not Found Error")
            || self
                .problem_type
                .as_deref()
                .is_some_and(|t| t.ends_with("resource-not-found"))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TweetData {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LikeData {
    pub liked: bool,
}
