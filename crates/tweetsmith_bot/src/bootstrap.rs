//! Wiring configuration and credentials into a runnable bot.

use crate::{
    ActionContext, BackendChoice, BackendSettings, BotConfig, BotMetrics, Credentials, SharedRng,
    WeightedDispatcher,
};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tweetsmith_core::CompletionRequest;
use tweetsmith_database::select_activity_store;
use tweetsmith_error::{ConfigError, TweetsmithResult};
use tweetsmith_interface::{ActivityStore, SocialPlatform, TextBackend};
use tweetsmith_models::{ContentProvider, GeminiClient, GenerationSettings, OpenAiClient};
use tweetsmith_social::{DryRunPlatform, Publisher, TwitterClient};

/// A fully wired bot.
#[derive(Debug)]
pub struct Bot {
    /// Validated configuration
    pub config: Arc<BotConfig>,
    /// Collaborators shared by the actions
    pub context: ActionContext,
    /// Dispatcher over every action
    pub dispatcher: Arc<WeightedDispatcher>,
}

impl Bot {
    /// Wire a bot from explicit collaborators.
    ///
    /// # Errors
    ///
    /// Returns error if the configured weights are rejected.
    pub fn assemble(
        config: Arc<BotConfig>,
        provider: Arc<ContentProvider>,
        platform: Arc<dyn SocialPlatform>,
        store: Arc<dyn ActivityStore>,
        rng: SharedRng,
    ) -> Result<Self, ConfigError> {
        let publisher = Publisher::new(
            platform,
            Arc::clone(&store),
            Duration::from_millis(config.thread.delay_between_posts_ms),
        );
        let context = ActionContext {
            provider,
            publisher,
            store,
            config: Arc::clone(&config),
            rng: Arc::clone(&rng),
        };
        let dispatcher = WeightedDispatcher::new(context.descriptors(), rng, BotMetrics::new())?;

        Ok(Self {
            config,
            context,
            dispatcher: Arc::new(dispatcher),
        })
    }

    /// Wire a bot from configuration and environment credentials.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid, the Twitter token is
    /// missing outside dry-run mode, or a configured database is unreachable.
    pub fn from_config(
        config: BotConfig,
        credentials: &Credentials,
        dry_run: bool,
    ) -> TweetsmithResult<Self> {
        config.validate()?;
        let config = Arc::new(config);

        let store = select_activity_store(credentials.database_url.as_deref())?;
        let platform = social_platform(credentials, dry_run)?;
        let provider = content_provider(&config, credentials, Arc::clone(&store))?;
        let rng: SharedRng = Arc::new(Mutex::new(StdRng::from_entropy()));

        info!(
            platform = platform.platform_name(),
            store = store.store_name(),
            dry_run,
            "Bot wired"
        );
        Ok(Self::assemble(config, Arc::new(provider), platform, store, rng)?)
    }
}

/// Build the client of a backend, or `None` without its API key.
pub fn text_backend(
    choice: BackendChoice,
    settings: &BackendSettings,
    credentials: &Credentials,
) -> Option<Arc<dyn TextBackend>> {
    let Some(api_key) = credentials.api_key(choice) else {
        warn!(backend = %choice, "API key not set, backend disabled");
        return None;
    };

    let backend: Arc<dyn TextBackend> = match choice {
        BackendChoice::OpenAi => {
            let client = OpenAiClient::new(api_key, &settings.model);
            Arc::new(match &settings.base_url {
                Some(url) => client.with_base_url(url),
                None => client,
            })
        }
        BackendChoice::Gemini => {
            let client = GeminiClient::new(api_key, &settings.model);
            Arc::new(match &settings.base_url {
                Some(url) => client.with_base_url(url),
                None => client,
            })
        }
    };
    Some(backend)
}

fn generation_settings(settings: &BackendSettings) -> GenerationSettings {
    GenerationSettings::new(settings.max_tokens, settings.temperature)
}

/// Build the content provider from the `[ai]` and `[prompts]` sections.
pub fn content_provider(
    config: &BotConfig,
    credentials: &Credentials,
    store: Arc<dyn ActivityStore>,
) -> Result<ContentProvider, ConfigError> {
    let mut builder = ContentProvider::builder()
        .prompts(config.prompts.clone())
        .store(store);

    let primary = config.ai.settings(config.ai.primary);
    if let Some(backend) = text_backend(config.ai.primary, primary, credentials) {
        builder = builder.primary(backend, generation_settings(primary));
    }

    if let Some(choice) = config.ai.secondary {
        let secondary = config.ai.settings(choice);
        if let Some(backend) = text_backend(choice, secondary, credentials) {
            builder = builder.secondary(backend, generation_settings(secondary));
        }
    }

    builder.build()
}

/// Twitter client, or the dry-run platform.
///
/// In dry-run mode a set token still serves reads so engagement can pick
/// real items.
pub fn social_platform(
    credentials: &Credentials,
    dry_run: bool,
) -> Result<Arc<dyn SocialPlatform>, ConfigError> {
    let twitter = credentials
        .twitter_bearer_token
        .as_deref()
        .map(|token| Arc::new(TwitterClient::new(token)) as Arc<dyn SocialPlatform>);

    match (dry_run, twitter) {
        (true, Some(reader)) => Ok(Arc::new(DryRunPlatform::with_reader(reader))),
        (true, None) => Ok(Arc::new(DryRunPlatform::new())),
        (false, Some(twitter)) => Ok(twitter),
        (false, None) => Err(ConfigError::new(
            "TWITTER_BEARER_TOKEN is not set (use --dry-run to run without posting)",
        )),
    }
}

/// Result of probing one external service.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionCheck {
    /// Service probed
    pub target: String,
    /// Description on success, error message on failure
    pub result: Result<String, String>,
}

impl ConnectionCheck {
    fn new(target: impl Into<String>, result: Result<String, String>) -> Self {
        Self {
            target: target.into(),
            result,
        }
    }

    /// Whether the probe succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Probe the platform account and every configured backend.
pub async fn check_connections(
    config: &BotConfig,
    credentials: &Credentials,
) -> Vec<ConnectionCheck> {
    let mut checks = Vec::new();

    let twitter = match credentials.twitter_bearer_token.as_deref() {
        Some(token) => match TwitterClient::new(token).current_account().await {
            Ok(account) => Ok(format!("authenticated as @{}", account.username())),
            Err(e) => Err(e.to_string()),
        },
        None => Err("TWITTER_BEARER_TOKEN is not set".to_string()),
    };
    checks.push(ConnectionCheck::new("twitter", twitter));

    let choices = std::iter::once(config.ai.primary).chain(config.ai.secondary);
    for choice in choices {
        let settings = config.ai.settings(choice);
        let result = match text_backend(choice, settings, credentials) {
            Some(backend) => {
                let request = CompletionRequest {
                    system: None,
                    prompt: "Reply with the single word: ok".to_string(),
                    max_tokens: 10,
                    temperature: 0.0,
                };
                backend
                    .complete(&request)
                    .await
                    .map(|text| format!("{} replied {:?}", backend.model_name(), text.trim()))
                    .map_err(|e| e.to_string())
            }
            None => Err("API key is not set".to_string()),
        };
        checks.push(ConnectionCheck::new(choice.to_string(), result));
    }

    checks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_requires_dry_run() {
        let credentials = Credentials::default();
        assert!(social_platform(&credentials, false).is_err());
        let platform = social_platform(&credentials, true).unwrap();
        assert_eq!(platform.platform_name(), "dry-run");
    }

    #[test]
    fn test_backend_without_key_is_disabled() {
        let config = BotConfig::bundled().unwrap();
        let credentials = Credentials::default();
        assert!(text_backend(BackendChoice::OpenAi, &config.ai.openai, &credentials).is_none());
    }

    #[test]
    fn test_backend_with_key_is_built() {
        let config = BotConfig::bundled().unwrap();
        let credentials = Credentials {
            gemini_api_key: Some("key".to_string()),
            ..Credentials::default()
        };
        let backend = text_backend(BackendChoice::Gemini, &config.ai.gemini, &credentials).unwrap();
        assert_eq!(backend.provider_name(), "gemini");
        assert_eq!(backend.model_name(), config.ai.gemini.model);
    }

    #[test]
    fn test_from_config_dry_run_without_credentials() {
        let bot = Bot::from_config(BotConfig::bundled().unwrap(), &Credentials::default(), true)
            .unwrap();
        assert_eq!(bot.dispatcher.actions().len(), 5);
        assert_eq!(bot.dispatcher.total_weight(), 11.0);
        assert_eq!(bot.context.store.store_name(), "log-only");
    }

    #[tokio::test]
    async fn test_check_without_credentials_reports_every_target() {
        let config = BotConfig::bundled().unwrap();
        let checks = check_connections(&config, &Credentials::default()).await;
        let targets: Vec<_> = checks.iter().map(|c| c.target.as_str()).collect();
        assert_eq!(targets, vec!["twitter", "openai", "gemini"]);
        assert!(checks.iter().all(|c| !c.is_ok()));
    }
}
