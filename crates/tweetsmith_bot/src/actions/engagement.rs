//! Engagement with target accounts: like, quote-repost, reply.

use super::{ActionContext, ActionKind, ActionOutcome, BotAction, fit_to_limit};
use crate::EngagementConfig;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};
use tweetsmith_core::{
    Collection, EngagementRecord, PostKind, PostOptions, PromptKey, TimelineExclude, TimelineItem,
};
use tweetsmith_interface::append_or_log;
use tweetsmith_social::MAX_POST_CHARS;

const TIMELINE_EXCLUDES: [TimelineExclude; 2] = [TimelineExclude::Retweets, TimelineExclude::Replies];

/// Which engagements to perform on a chosen item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngagementDecision {
    /// Like the item
    pub like: bool,
    /// Quote-repost the item
    pub quote: bool,
    /// Reply to the item
    pub reply: bool,
}

/// Decide each engagement by comparing an independent uniform draw in
/// `[0, 1)` against its probability.
///
/// `draws` are `[like, quote, reply]`.
pub fn decide_engagement(config: &EngagementConfig, draws: [f64; 3]) -> EngagementDecision {
    EngagementDecision {
        like: draws[0] < config.like_probability,
        quote: draws[1] < config.quote_probability,
        reply: draws[2] < config.reply_probability,
    }
}

/// Picks a target account and one of its recent items, then likes, quotes,
/// and replies at random.
pub struct EngageCommunity {
    ctx: ActionContext,
}

impl EngageCommunity {
    /// Create the action.
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }

    fn pick_account(&self) -> Option<String> {
        let mut rng = self.ctx.rng.lock();
        self.ctx
            .config
            .target_accounts
            .iter()
            .filter(|a| !a.trim().is_empty())
            .collect::<Vec<_>>()
            .choose(&mut *rng)
            .map(|a| a.trim_start_matches('@').to_string())
    }

    fn pick_item_and_decide(&self, items: &[TimelineItem]) -> Option<(TimelineItem, EngagementDecision)> {
        let mut rng = self.ctx.rng.lock();
        let item = items.choose(&mut *rng)?.clone();
        let draws = [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)];
        Some((item, decide_engagement(&self.ctx.config.engagement, draws)))
    }

    async fn respond(&self, item: &TimelineItem, key: PromptKey) -> Option<String> {
        let content = self.ctx.provider.generate_for(key, Some(item.text())).await;
        let text = fit_to_limit(content.text(), MAX_POST_CHARS);
        let (options, kind) = match key {
            PromptKey::EngagementQuote => (PostOptions::Quote(item.id().clone()), PostKind::Quote),
            _ => (PostOptions::ReplyTo(item.id().clone()), PostKind::Reply),
        };
        self.ctx
            .publisher
            .publish_with(&text, &options, kind)
            .await
            .map(|published| published.external_id().clone())
    }
}

#[async_trait]
impl BotAction for EngageCommunity {
    fn name(&self) -> &str {
        ActionKind::Engagement.as_str()
    }

    #[instrument(skip(self), fields(action = "engagement"))]
    async fn run(&self) -> ActionOutcome {
        let Some(account) = self.pick_account() else {
            return ActionOutcome::Skipped("no target accounts configured".to_string());
        };

        let platform = self.ctx.publisher.platform();
        let account_id = match platform.account_by_handle(&account).await {
            Ok(id) => id,
            Err(e) => {
                warn!(account = %account, error = %e, "Could not resolve account");
                return ActionOutcome::Failed(format!("could not resolve @{account}"));
            }
        };

        let items = match platform
            .recent_items(
                &account_id,
                self.ctx.config.engagement.max_items_to_check,
                &TIMELINE_EXCLUDES,
            )
            .await
        {
            Ok(items) => items,
            Err(e) => {
                warn!(account = %account, error = %e, "Could not fetch recent items");
                return ActionOutcome::Failed(format!("could not fetch items of @{account}"));
            }
        };

        let Some((item, decision)) = self.pick_item_and_decide(&items) else {
            info!(account = %account, "No recent items to engage with");
            return ActionOutcome::Skipped(format!("@{account} has no recent items"));
        };
        debug!(account = %account, item_id = %item.id(), ?decision, "Engaging");

        let liked = if decision.like {
            match platform.like(item.id()).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(item_id = %item.id(), error = %e, "Like failed");
                    false
                }
            }
        } else {
            false
        };

        let quote_id = if decision.quote {
            self.respond(&item, PromptKey::EngagementQuote).await
        } else {
            None
        };

        let reply_id = if decision.reply {
            self.respond(&item, PromptKey::EngagementReply).await
        } else {
            None
        };

        let record = EngagementRecord {
            account: account.clone(),
            item_id: item.id().clone(),
            liked,
            quote_id: quote_id.clone(),
            reply_id: reply_id.clone(),
            created_at: Utc::now(),
        };
        append_or_log(self.ctx.store.as_ref(), Collection::Engagements, &record).await;

        info!(
            account = %account,
            item_id = %item.id(),
            liked,
            quoted = quote_id.is_some(),
            replied = reply_id.is_some(),
            "Engagement finished"
        );

        let attempted = usize::from(decision.quote) + usize::from(decision.reply);
        let published = usize::from(quote_id.is_some()) + usize::from(reply_id.is_some());
        if published < attempted || (decision.like && !liked) {
            ActionOutcome::Failed(format!("engagement with @{account} partly failed"))
        } else {
            ActionOutcome::Completed { published }
        }
    }
}
