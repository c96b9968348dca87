//! The bot's actions.
//!
//! Each action generates content, shapes it for the platform, and publishes
//! it. Failures are reported through [`ActionOutcome`] and never propagate.

mod engagement;
mod hashtags;
mod news;
mod poll;
mod quote;
mod thread;

pub use engagement::{EngageCommunity, EngagementDecision, decide_engagement};
pub use hashtags::{append_hashtag, fit_to_limit, has_hashtag, pick_tag};
pub use news::PostNews;
pub use poll::{CreatePoll, POLL_OPTION_MAX_CHARS};
pub use quote::PostQuote;
pub use thread::CreateThread;

use crate::{ActionDescriptor, BotConfig};
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tweetsmith_interface::ActivityStore;
use tweetsmith_models::ContentProvider;
use tweetsmith_social::Publisher;

/// Random source shared by the dispatcher and the actions.
pub type SharedRng = Arc<Mutex<StdRng>>;

/// Result of running one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The action ran; `published` items went out.
    Completed {
        /// Number of posts published
        published: usize,
    },
    /// Nothing to do (e.g. an empty timeline).
    Skipped(String),
    /// The action could not finish.
    Failed(String),
}

impl ActionOutcome {
    /// Whether the outcome counts as a failure in metrics.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A named unit of bot work.
#[async_trait]
pub trait BotAction: Send + Sync {
    /// Action name used in logs, metrics, and the CLI.
    fn name(&self) -> &str;

    /// Run the action once.
    async fn run(&self) -> ActionOutcome;
}

/// The fixed set of actions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionKind {
    /// Post an inspirational quote
    Quote,
    /// Post a tech news headline
    News,
    /// Create a poll
    Poll,
    /// Create a thread
    Thread,
    /// Engage with a target account
    Engagement,
}

impl ActionKind {
    /// Name used in logs, metrics, and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::News => "news",
            Self::Poll => "poll",
            Self::Thread => "thread",
            Self::Engagement => "engagement",
        }
    }
}

/// Collaborators shared by every action.
#[derive(Clone)]
pub struct ActionContext {
    /// Content generation
    pub provider: Arc<ContentProvider>,
    /// Publishing
    pub publisher: Publisher,
    /// Activity log
    pub store: Arc<dyn ActivityStore>,
    /// Configuration
    pub config: Arc<BotConfig>,
    /// Random source
    pub rng: SharedRng,
}

impl std::fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("provider", &self.provider)
            .field("publisher", &self.publisher)
            .field("store", &self.store.store_name())
            .finish_non_exhaustive()
    }
}

impl ActionContext {
    /// Build the action of a kind.
    pub fn action(&self, kind: ActionKind) -> Arc<dyn BotAction> {
        match kind {
            ActionKind::Quote => Arc::new(PostQuote::new(self.clone())),
            ActionKind::News => Arc::new(PostNews::new(self.clone())),
            ActionKind::Poll => Arc::new(CreatePoll::new(self.clone())),
            ActionKind::Thread => Arc::new(CreateThread::new(self.clone())),
            ActionKind::Engagement => Arc::new(EngageCommunity::new(self.clone())),
        }
    }

    /// All actions with their configured weights, in selection order.
    pub fn descriptors(&self) -> Vec<ActionDescriptor> {
        let weights = &self.config.weights;
        [
            (ActionKind::Quote, weights.quote),
            (ActionKind::News, weights.news),
            (ActionKind::Poll, weights.poll),
            (ActionKind::Thread, weights.thread),
            (ActionKind::Engagement, weights.engagement),
        ]
        .into_iter()
        .map(|(kind, weight)| ActionDescriptor::new(kind.as_str(), weight, self.action(kind)))
        .collect()
    }

    /// Pick a tag with `rng` held only for the pick.
    pub(crate) fn pick_tag(&self, tags: &[String]) -> Option<String> {
        let mut rng = self.rng.lock();
        pick_tag(tags, &self.config.hashtags.default, &mut *rng).map(str::to_string)
    }
}
