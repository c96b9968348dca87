use super::{
    ActionContext, ActionKind, ActionOutcome, BotAction, append_hashtag, fit_to_limit, has_hashtag,
};
use async_trait::async_trait;
use tracing::instrument;
use tweetsmith_core::PromptKey;
use tweetsmith_social::MAX_POST_CHARS;

/// Posts a generated tech headline; adds a tech hashtag when it has none.
pub struct PostNews {
    ctx: ActionContext,
}

impl PostNews {
    /// Create the action.
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl BotAction for PostNews {
    fn name(&self) -> &str {
        ActionKind::News.as_str()
    }

    #[instrument(skip(self), fields(action = "news"))]
    async fn run(&self) -> ActionOutcome {
        let content = self.ctx.provider.generate(PromptKey::NewsItem).await;
        let mut text = fit_to_limit(content.text(), MAX_POST_CHARS);
        if !has_hashtag(&text) {
            if let Some(tag) = self.ctx.pick_tag(&self.ctx.config.hashtags.tech) {
                text = append_hashtag(&text, &tag);
            }
        }

        match self.ctx.publisher.publish_single(&text).await {
            Some(_) => ActionOutcome::Completed { published: 1 },
            None => ActionOutcome::Failed("news was not published".to_string()),
        }
    }
}
