use super::{ActionContext, ActionKind, ActionOutcome, BotAction, append_hashtag, fit_to_limit};
use async_trait::async_trait;
use tracing::instrument;
use tweetsmith_core::PromptKey;
use tweetsmith_social::MAX_POST_CHARS;

/// Posts a generated quote with one quote hashtag.
pub struct PostQuote {
    ctx: ActionContext,
}

impl PostQuote {
    /// Create the action.
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl BotAction for PostQuote {
    fn name(&self) -> &str {
        ActionKind::Quote.as_str()
    }

    #[instrument(skip(self), fields(action = "quote"))]
    async fn run(&self) -> ActionOutcome {
        let content = self.ctx.provider.generate(PromptKey::Quote).await;
        let mut text = fit_to_limit(content.text(), MAX_POST_CHARS);
        if let Some(tag) = self.ctx.pick_tag(&self.ctx.config.hashtags.quotes) {
            text = append_hashtag(&text, &tag);
        }

        match self.ctx.publisher.publish_single(&text).await {
            Some(_) => ActionOutcome::Completed { published: 1 },
            None => ActionOutcome::Failed("quote was not published".to_string()),
        }
    }
}
