//! Scheduled posting bot for a microblogging platform.
//!
//! Cron schedules feed a single bot loop that runs one action at a time:
//! - **Quote**, **News**: single posts with a hashtag
//! - **Poll**: a question with four options
//! - **Thread**: a reply chain published with a delay between items
//! - **Engagement**: likes, quotes, and replies to a target account's post
//!
//! The main schedule picks an action by configured weight.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod actions;
mod api;
mod bootstrap;
mod config;
mod dispatcher;
mod metrics;
mod observability;
mod schedule;
mod server;

pub use actions::{
    ActionContext, ActionKind, ActionOutcome, BotAction, CreatePoll, CreateThread,
    EngageCommunity, EngagementDecision, POLL_OPTION_MAX_CHARS, PostNews, PostQuote, SharedRng,
    append_hashtag, decide_engagement, fit_to_limit, has_hashtag, pick_tag,
};
pub use api::{ApiState, HealthResponse, create_router};
pub use bootstrap::{
    Bot, ConnectionCheck, check_connections, content_provider, social_platform, text_backend,
};
pub use config::{
    AiConfig, BackendChoice, BackendSettings, BotConfig, BotInfo, Credentials, EngagementConfig,
    HashtagConfig, PollConfig, ScheduleConfig, ServerConfig, ThreadConfig, WeightsConfig,
};
pub use dispatcher::{ActionDescriptor, WeightedDispatcher};
pub use metrics::{ActionMetricSnapshot, BotMetrics, MetricsSnapshot};
pub use observability::{DEFAULT_LOG_FILTER, init_tracing};
pub use schedule::{delay_until, next_fire, normalize_cron, parse_cron};
pub use server::{BotLoop, BotMessage, BotServer, Trigger};
