//! Bot configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`tweetsmith.toml` shipped with the crate)
//! 2. `~/.config/tweetsmith/tweetsmith.toml`
//! 3. `./tweetsmith.toml`, or the file passed explicitly
//! 4. Environment variables prefixed `TWEETSMITH__` (e.g. `TWEETSMITH__WEIGHTS__QUOTE=5`)
//!
//! Credentials are never read from files; see [`Credentials`].

use crate::schedule::parse_cron;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};
use tweetsmith_core::POLL_OPTION_COUNT;
use tweetsmith_error::ConfigError;
use tweetsmith_models::PromptTemplates;

const DEFAULT_CONFIG: &str = include_str!("../../../tweetsmith.toml");

/// Twitter accepts polls open between five minutes and seven days.
const POLL_DURATION_RANGE: std::ops::RangeInclusive<u32> = 5..=10_080;

/// Top-level bot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot identity
    pub bot: BotInfo,
    /// Text backend selection and settings
    pub ai: AiConfig,
    /// Prompt templates
    #[serde(default)]
    pub prompts: PromptTemplates,
    /// Cron expressions per activity
    pub schedule: ScheduleConfig,
    /// Relative weights of the randomly selected actions
    pub weights: WeightsConfig,
    /// Handles engaged with, without `@`
    #[serde(default)]
    pub target_accounts: Vec<String>,
    /// Hashtag sets per content type
    pub hashtags: HashtagConfig,
    /// Poll settings
    pub poll: PollConfig,
    /// Thread settings
    pub thread: ThreadConfig,
    /// Engagement settings
    pub engagement: EngagementConfig,
    /// Health endpoint settings
    pub server: ServerConfig,
}

/// Bot identity reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotInfo {
    /// Display name
    pub name: String,
    /// Bot version string
    pub version: String,
    /// Short description
    #[serde(default)]
    pub description: String,
}

/// Available text backends.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendChoice {
    /// OpenAI chat completions
    OpenAi,
    /// Google Gemini
    Gemini,
}

/// Backend selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Backend tried first
    pub primary: BackendChoice,
    /// Backend tried when the primary fails
    #[serde(default)]
    pub secondary: Option<BackendChoice>,
    /// OpenAI settings
    pub openai: BackendSettings,
    /// Gemini settings
    pub gemini: BackendSettings,
}

impl AiConfig {
    /// Settings of a backend.
    pub fn settings(&self, choice: BackendChoice) -> &BackendSettings {
        match choice {
            BackendChoice::OpenAi => &self.openai,
            BackendChoice::Gemini => &self.gemini,
        }
    }
}

/// Per-backend model and sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Model identifier
    pub model: String,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Alternative API base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Cron expressions per activity, evaluated in UTC. An empty expression
/// disables the activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Weighted random action
    pub main_activity: String,
    /// Fixed quote post
    #[serde(default)]
    pub morning_quote: String,
    /// Fixed poll
    #[serde(default)]
    pub lunch_poll: String,
    /// Fixed thread
    #[serde(default)]
    pub afternoon_thread: String,
    /// Fixed news post
    #[serde(default)]
    pub evening_news: String,
    /// Fixed engagement round
    #[serde(default)]
    pub community_engagement: String,
}

impl ScheduleConfig {
    /// Named, enabled expressions.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("main_activity", self.main_activity.as_str()),
            ("morning_quote", self.morning_quote.as_str()),
            ("lunch_poll", self.lunch_poll.as_str()),
            ("afternoon_thread", self.afternoon_thread.as_str()),
            ("evening_news", self.evening_news.as_str()),
            ("community_engagement", self.community_engagement.as_str()),
        ]
        .into_iter()
        .filter(|(_, expression)| !expression.trim().is_empty())
        .collect()
    }
}

/// Relative selection weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsConfig {
    /// Quote post
    pub quote: f64,
    /// News post
    pub news: f64,
    /// Poll
    pub poll: f64,
    /// Thread
    pub thread: f64,
    /// Engagement round
    pub engagement: f64,
}

impl WeightsConfig {
    /// Weights paired with their action names, in selection order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("quote", self.quote),
            ("news", self.news),
            ("poll", self.poll),
            ("thread", self.thread),
            ("engagement", self.engagement),
        ]
    }
}

/// Hashtag sets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HashtagConfig {
    /// General tags
    pub default: Vec<String>,
    /// Appended to quotes
    pub quotes: Vec<String>,
    /// Appended to news without tags
    pub tech: Vec<String>,
    /// Appended to poll questions
    pub polls: Vec<String>,
    /// Appended to the first thread item
    pub threads: Vec<String>,
}

/// Poll settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollConfig {
    /// How long polls stay open
    pub duration_minutes: u32,
    /// Number of options per poll
    pub max_options: usize,
}

/// Thread settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadConfig {
    /// Pause between consecutive posts of a thread
    pub delay_between_posts_ms: u64,
    /// Maximum number of posts per thread
    pub max_posts: usize,
}

/// Engagement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementConfig {
    /// Recent items fetched per account
    pub max_items_to_check: u32,
    /// Chance of liking the chosen item
    pub like_probability: f64,
    /// Chance of quote-reposting the chosen item
    pub quote_probability: f64,
    /// Chance of replying to the chosen item
    pub reply_probability: f64,
}

/// Health endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the health endpoint binds to
    pub bind_address: String,
}

impl BotConfig {
    /// Load configuration with the full precedence chain.
    ///
    /// `path` replaces `./tweetsmith.toml` and must exist when given.
    ///
    /// # Errors
    ///
    /// Returns error if a source cannot be read or the merged result does
    /// not deserialize.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/tweetsmith/tweetsmith.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("tweetsmith").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("TWEETSMITH")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("target_accounts"),
        );

        Self::from_config(builder.build())
    }

    /// Bundled defaults only.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_config(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .build(),
        )
    }

    /// Parse a TOML document layered over the bundled defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::from_config(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from_str(toml, FileFormat::Toml))
                .build(),
        )
    }

    fn from_config(built: Result<Config, ::config::ConfigError>) -> Result<Self, ConfigError> {
        built
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {e}")))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {e}")))
    }

    /// Check the configuration for errors that would break the bot at runtime.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in self.weights.entries() {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ConfigError::new(format!(
                    "weights.{name} must be positive, got {weight}"
                )));
            }
        }

        let probabilities = [
            ("like_probability", self.engagement.like_probability),
            ("quote_probability", self.engagement.quote_probability),
            ("reply_probability", self.engagement.reply_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::new(format!(
                    "engagement.{name} must be within [0, 1], got {p}"
                )));
            }
        }

        if self.schedule.main_activity.trim().is_empty() {
            return Err(ConfigError::new("schedule.main_activity must be set"));
        }
        for (name, expression) in self.schedule.entries() {
            parse_cron(expression)
                .map_err(|e| ConfigError::new(format!("schedule.{name}: {}", e.message)))?;
        }

        if self.target_accounts.iter().all(|a| a.trim().is_empty()) && self.weights.engagement > 0.0
        {
            return Err(ConfigError::new(
                "target_accounts is empty but engagement has a positive weight",
            ));
        }

        if self.thread.max_posts == 0 {
            return Err(ConfigError::new("thread.max_posts must be at least 1"));
        }

        if self.poll.max_options != POLL_OPTION_COUNT {
            return Err(ConfigError::new(format!(
                "poll.max_options must be {POLL_OPTION_COUNT}, got {}",
                self.poll.max_options
            )));
        }
        if !POLL_DURATION_RANGE.contains(&self.poll.duration_minutes) {
            return Err(ConfigError::new(format!(
                "poll.duration_minutes must be within {}..={}, got {}",
                POLL_DURATION_RANGE.start(),
                POLL_DURATION_RANGE.end(),
                self.poll.duration_minutes
            )));
        }

        if self.ai.secondary == Some(self.ai.primary) {
            return Err(ConfigError::new(format!(
                "ai.secondary must differ from ai.primary ({})",
                self.ai.primary
            )));
        }

        Ok(())
    }
}

/// Secrets read from the environment (after loading `.env`).
#[derive(Clone, Default)]
pub struct Credentials {
    /// `OPENAI_API_KEY`
    pub openai_api_key: Option<String>,
    /// `GEMINI_API_KEY`
    pub gemini_api_key: Option<String>,
    /// `TWITTER_BEARER_TOKEN`, an OAuth 2.0 user-context token
    pub twitter_bearer_token: Option<String>,
    /// `DATABASE_URL`
    pub database_url: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &self.openai_api_key.is_some())
            .field("gemini_api_key", &self.gemini_api_key.is_some())
            .field("twitter_bearer_token", &self.twitter_bearer_token.is_some())
            .field("database_url", &self.database_url.is_some())
            .finish()
    }
}

impl Credentials {
    /// Load `.env` if present, then read each variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            openai_api_key: var("OPENAI_API_KEY"),
            gemini_api_key: var("GEMINI_API_KEY"),
            twitter_bearer_token: var("TWITTER_BEARER_TOKEN"),
            database_url: var("DATABASE_URL"),
        }
    }

    /// API key for a backend.
    pub fn api_key(&self, choice: BackendChoice) -> Option<&str> {
        match choice {
            BackendChoice::OpenAi => self.openai_api_key.as_deref(),
            BackendChoice::Gemini => self.gemini_api_key.as_deref(),
        }
    }
}
