//! Generated content.

use crate::PromptKey;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Which tier of the generation chain produced a piece of content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceBackend {
    /// Configured primary backend
    Primary,
    /// Configured secondary backend
    Secondary,
    /// Static fallback table
    Fallback,
}

/// Text produced by the content provider. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Generated text, trimmed
    text: String,
    /// Tier that produced the text
    source_backend: SourceBackend,
    /// Provider behind the tier (e.g. "openai", "gemini", "static")
    provider: String,
    /// Prompt the text answers
    prompt_key: PromptKey,
}

impl GeneratedContent {
    /// Create generated content.
    pub fn new(
        text: impl Into<String>,
        source_backend: SourceBackend,
        provider: impl Into<String>,
        prompt_key: PromptKey,
    ) -> Self {
        Self {
            text: text.into(),
            source_backend,
            provider: provider.into(),
            prompt_key,
        }
    }

    /// Whether the text came from the static fallback table.
    pub fn is_fallback(&self) -> bool {
        self.source_backend == SourceBackend::Fallback
    }

    /// Consume and return the text.
    pub fn into_text(self) -> String {
        self.text
    }
}
