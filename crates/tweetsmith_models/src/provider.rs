//! Content provider with ordered backend fallback.

use crate::{FallbackTable, PromptTemplates};
use chrono::Utc;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use tweetsmith_core::{Collection, CompletionRequest, GeneratedContent, GenerationRecord, PromptKey, SourceBackend};
use tweetsmith_error::{BackendError, BackendErrorKind, BackendResult, ConfigError};
use tweetsmith_interface::{ActivityStore, TextBackend, append_or_log};

const STATIC_PROVIDER: &str = "static";

/// Per-backend sampling settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl GenerationSettings {
    /// Create generation settings.
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::new(500, 0.7)
    }
}

struct BackendSlot {
    tier: SourceBackend,
    backend: Arc<dyn TextBackend>,
    settings: GenerationSettings,
}

/// Generates text for a prompt key and never fails.
///
/// Tries the primary backend, then the secondary backend, then the static
/// [`FallbackTable`]. Every result is recorded in the activity store.
pub struct ContentProvider {
    slots: Vec<BackendSlot>,
    prompts: PromptTemplates,
    fallback: FallbackTable,
    store: Arc<dyn ActivityStore>,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for ContentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentProvider")
            .field(
                "backends",
                &self
                    .slots
                    .iter()
                    .map(|slot| (slot.tier, slot.backend.provider_name()))
                    .collect::<Vec<_>>(),
            )
            .field("store", &self.store.store_name())
            .finish_non_exhaustive()
    }
}

impl ContentProvider {
    /// Create a builder for a content provider.
    pub fn builder() -> ContentProviderBuilder {
        ContentProviderBuilder::default()
    }

    /// Prompt templates in use.
    pub fn prompts(&self) -> &PromptTemplates {
        &self.prompts
    }

    /// Generate content for a prompt key.
    pub async fn generate(&self, key: PromptKey) -> GeneratedContent {
        self.generate_for(key, None).await
    }

    /// Generate content for a prompt key, substituting `source_text` into
    /// engagement templates.
    #[instrument(skip(self, source_text), fields(prompt_key = %key))]
    pub async fn generate_for(&self, key: PromptKey, source_text: Option<&str>) -> GeneratedContent {
        let prompt = self.prompts.render(key, source_text);

        let mut content = None;
        for slot in &self.slots {
            match self.attempt(slot, &prompt).await {
                Ok(text) => {
                    debug!(
                        backend = %slot.tier,
                        provider = slot.backend.provider_name(),
                        "Generated content"
                    );
                    content = Some(GeneratedContent::new(
                        text,
                        slot.tier,
                        slot.backend.provider_name(),
                        key,
                    ));
                    break;
                }
                Err(e) => {
                    warn!(
                        backend = %slot.tier,
                        provider = slot.backend.provider_name(),
                        quota = e.kind.is_quota(),
                        error = %e,
                        "Backend generation failed"
                    );
                }
            }
        }

        let content = match content {
            Some(content) => content,
            None => {
                let text = self.fallback.pick(key, &mut *self.rng.lock()).to_string();
                warn!("All backends failed, using static fallback content");
                GeneratedContent::new(text, SourceBackend::Fallback, STATIC_PROVIDER, key)
            }
        };

        let record = GenerationRecord {
            text: content.text().clone(),
            backend: *content.source_backend(),
            provider: content.provider().clone(),
            prompt_key: key,
            created_at: Utc::now(),
        };
        append_or_log(self.store.as_ref(), Collection::Generations, &record).await;

        content
    }

    async fn attempt(&self, slot: &BackendSlot, prompt: &str) -> BackendResult<String> {
        let request = CompletionRequest {
            system: Some(self.prompts.system.clone()).filter(|s| !s.trim().is_empty()),
            prompt: prompt.to_string(),
            max_tokens: slot.settings.max_tokens,
            temperature: slot.settings.temperature,
        };

        let text = slot.backend.complete(&request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(BackendError::new(BackendErrorKind::EmptyResponse));
        }
        Ok(text.to_string())
    }
}

/// Builder for [`ContentProvider`].
#[derive(Default)]
pub struct ContentProviderBuilder {
    primary: Option<(Arc<dyn TextBackend>, GenerationSettings)>,
    secondary: Option<(Arc<dyn TextBackend>, GenerationSettings)>,
    prompts: Option<PromptTemplates>,
    fallback: Option<FallbackTable>,
    store: Option<Arc<dyn ActivityStore>>,
    rng: Option<StdRng>,
}

impl std::fmt::Debug for ContentProviderBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentProviderBuilder")
            .field(
                "primary",
                &self.primary.as_ref().map(|(backend, _)| backend.provider_name()),
            )
            .field(
                "secondary",
                &self
                    .secondary
                    .as_ref()
                    .map(|(backend, _)| backend.provider_name()),
            )
            .field("store", &self.store.as_ref().map(|store| store.store_name()))
            .finish_non_exhaustive()
    }
}

impl ContentProviderBuilder {
    /// Backend tried first.
    pub fn primary(mut self, backend: Arc<dyn TextBackend>, settings: GenerationSettings) -> Self {
        self.primary = Some((backend, settings));
        self
    }

    /// Backend tried when the primary fails.
    pub fn secondary(
        mut self,
        backend: Arc<dyn TextBackend>,
        settings: GenerationSettings,
    ) -> Self {
        self.secondary = Some((backend, settings));
        self
    }

    /// Prompt templates; defaults to [`PromptTemplates::default`].
    pub fn prompts(mut self, prompts: PromptTemplates) -> Self {
        self.prompts = Some(prompts);
        self
    }

    /// Static fallback table; defaults to [`FallbackTable::default`].
    pub fn fallback(mut self, fallback: FallbackTable) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Activity store generations are recorded in. Required.
    pub fn store(mut self, store: Arc<dyn ActivityStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Random source for fallback selection; defaults to an entropy seed.
    pub fn rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Build the provider.
    ///
    /// # Errors
    ///
    /// Returns error if no activity store was set.
    pub fn build(self) -> Result<ContentProvider, ConfigError> {
        let store = self
            .store
            .ok_or_else(|| ConfigError::new("content provider requires an activity store"))?;

        let slots = [
            self.primary.map(|b| (SourceBackend::Primary, b)),
            self.secondary.map(|b| (SourceBackend::Secondary, b)),
        ]
        .into_iter()
        .flatten()
        .map(|(tier, (backend, settings))| BackendSlot {
            tier,
            backend,
            settings,
        })
        .collect::<Vec<_>>();

        if slots.is_empty() {
            warn!("No text backends configured, every generation uses static fallback content");
        }

        Ok(ContentProvider {
            slots,
            prompts: self.prompts.unwrap_or_default(),
            fallback: self.fallback.unwrap_or_default(),
            store,
            rng: Mutex::new(self.rng.unwrap_or_else(StdRng::from_entropy)),
        })
    }
}
