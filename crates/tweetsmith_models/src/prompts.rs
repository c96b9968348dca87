//! Prompt templates keyed by [`PromptKey`].

use serde::{Deserialize, Serialize};
use tweetsmith_core::PromptKey;

/// Placeholder substituted with the source post's text in engagement prompts.
const SOURCE_TEXT_PLACEHOLDER: &str = "{text}";

/// Prompt template set.
///
/// Engagement templates contain `{text}`, replaced with the text of the post
/// being replied to or quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplates {
    /// System instruction sent with every request
    pub system: String,
    /// Quote prompt
    pub quote: String,
    /// News headline prompt
    pub news_item: String,
    /// Poll prompt
    pub poll: String,
    /// Thread prompt
    pub thread: String,
    /// Reply prompt
    pub engagement_reply: String,
    /// Quote-repost prompt
    pub engagement_quote: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: "You are a Twitter bot that creates engaging content for developers and tech \
                     enthusiasts. Be creative, informative, and authentic."
                .to_string(),
            quote: "Generate a short inspirational quote about technology or programming.\n\
                    Format: \"Quote text\" - Author Name\n\
                    Keep it under 100 words. Make it relevant to developers."
                .to_string(),
            news_item: "Generate a short tech news headline about AI, programming, or software.\n\
                        Make it sound like breaking news. Include 2-3 hashtags.\n\
                        Format: \"🚀 [Headline] #hashtag1 #hashtag2\"\n\
                        Keep it under 150 characters."
                .to_string(),
            poll: "Generate a tech poll question with 4 short options.\n\
                   Make it engaging for developers.\n\
                   Format:\n\
                   Question: \"What's your favorite...\"\n\
                   Options: [\"Option 1\", \"Option 2\", \"Option 3\", \"Option 4\"]\n\
                   Keep each option under 20 characters."
                .to_string(),
            thread: "Generate a 3-tweet educational thread about a tech topic.\n\
                     Topics: programming tips, AI tools, productivity.\n\
                     Make each tweet short and engaging. Number them 1️⃣, 2️⃣, 3️⃣.\n\
                     Put each tweet on its own line.\n\
                     Start with a title and emoji. Keep each tweet under 200 characters."
                .to_string(),
            engagement_reply: "Write a short, friendly and thoughtful reply to this tweet:\n\
                               \"{text}\"\n\
                               Keep it under 200 characters. No hashtags."
                .to_string(),
            engagement_quote: "Write a short comment to share this tweet with developers:\n\
                               \"{text}\"\n\
                               Keep it under 200 characters. Add one relevant hashtag."
                .to_string(),
        }
    }
}

impl PromptTemplates {
    /// Template for a prompt key, unrendered.
    pub fn template(&self, key: PromptKey) -> &str {
        match key {
            PromptKey::Quote => &self.quote,
            PromptKey::NewsItem => &self.news_item,
            PromptKey::Poll => &self.poll,
            PromptKey::Thread => &self.thread,
            PromptKey::EngagementReply => &self.engagement_reply,
            PromptKey::EngagementQuote => &self.engagement_quote,
        }
    }

    /// Render the prompt for `key`, substituting `source_text` into `{text}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetsmith_core::PromptKey;
    /// use tweetsmith_models::PromptTemplates;
    ///
    /// let prompts = PromptTemplates::default();
    /// let prompt = prompts.render(PromptKey::EngagementReply, Some("Rust 2024 is out"));
    /// assert!(prompt.contains("Rust 2024 is out"));
    /// ```
    pub fn render(&self, key: PromptKey, source_text: Option<&str>) -> String {
        self.template(key)
            .replace(SOURCE_TEXT_PLACEHOLDER, source_text.unwrap_or_default())
    }
}
