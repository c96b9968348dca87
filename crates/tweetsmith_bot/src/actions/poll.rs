use super::{ActionContext, ActionKind, ActionOutcome, BotAction, append_hashtag, fit_to_limit};
use async_trait::async_trait;
use tracing::{debug, instrument};
use tweetsmith_core::{PollDraft, PromptKey, parse_poll};
use tweetsmith_social::MAX_POST_CHARS;

/// Longest poll option the platform accepts.
pub const POLL_OPTION_MAX_CHARS: usize = 25;

/// Generates, parses, and publishes a four-option poll.
pub struct CreatePoll {
    ctx: ActionContext,
}

impl CreatePoll {
    /// Create the action.
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl BotAction for CreatePoll {
    fn name(&self) -> &str {
        ActionKind::Poll.as_str()
    }

    #[instrument(skip(self), fields(action = "poll"))]
    async fn run(&self) -> ActionOutcome {
        let content = self.ctx.provider.generate(PromptKey::Poll).await;
        let parsed = parse_poll(content.text(), self.ctx.config.poll.duration_minutes);
        debug!(question = %parsed.question(), options = ?parsed.options(), "Parsed poll");

        let mut question = fit_to_limit(parsed.question(), MAX_POST_CHARS);
        if let Some(tag) = self.ctx.pick_tag(&self.ctx.config.hashtags.polls) {
            question = append_hashtag(&question, &tag);
        }
        let options = parsed
            .options()
            .iter()
            .map(|option| fit_to_limit(option, POLL_OPTION_MAX_CHARS))
            .collect();
        let poll = PollDraft::new(question, options, *parsed.duration_minutes());

        match self.ctx.publisher.publish_poll(&poll).await {
            Some(_) => ActionOutcome::Completed { published: 1 },
            None => ActionOutcome::Failed("poll was not published".to_string()),
        }
    }
}
