use super::{ActionContext, ActionKind, ActionOutcome, BotAction, append_hashtag, fit_to_limit};
use async_trait::async_trait;
use tracing::instrument;
use tweetsmith_core::{PromptKey, parse_thread};
use tweetsmith_social::MAX_POST_CHARS;

/// Generates a thread and publishes it as a reply chain.
pub struct CreateThread {
    ctx: ActionContext,
}

impl CreateThread {
    /// Create the action.
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl BotAction for CreateThread {
    fn name(&self) -> &str {
        ActionKind::Thread.as_str()
    }

    #[instrument(skip(self), fields(action = "thread"))]
    async fn run(&self) -> ActionOutcome {
        let content = self.ctx.provider.generate(PromptKey::Thread).await;
        let mut draft = parse_thread(content.text(), self.ctx.config.thread.max_posts);
        if draft.is_empty() {
            return ActionOutcome::Failed("generated thread has no items".to_string());
        }

        let tag = self.ctx.pick_tag(&self.ctx.config.hashtags.threads);
        if let (Some(first), Some(tag)) = (draft.first_mut(), tag) {
            *first = append_hashtag(first, &tag);
        }

        let items: Vec<String> = draft
            .texts()
            .iter()
            .map(|text| fit_to_limit(text, MAX_POST_CHARS))
            .collect();
        let published = self.ctx.publisher.publish_chain(&items).await;

        if published.len() == items.len() {
            ActionOutcome::Completed {
                published: published.len(),
            }
        } else {
            ActionOutcome::Failed(format!(
                "thread stopped after {} of {} posts",
                published.len(),
                items.len()
            ))
        }
    }
}
