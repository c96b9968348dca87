//! Generative text backends and the content provider for Tweetsmith.
//!
//! # Available backends
//!
//! - **OpenAI** (and any OpenAI-compatible endpoint) via [`OpenAiClient`]
//! - **Gemini** (Google) via [`GeminiClient`]
//!
//! [`ContentProvider`] chains a primary and a secondary backend with a static
//! [`FallbackTable`], so generation always yields text.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tweetsmith_core::PromptKey;
//! use tweetsmith_interface::ActivityStore;
//! use tweetsmith_models::{ContentProvider, GenerationSettings, OpenAiClient};
//!
//! # async fn example(store: Arc<dyn ActivityStore>) -> Result<(), Box<dyn std::error::Error>> {
//! let openai = OpenAiClient::new("sk-...", "gpt-4o-mini");
//! let provider = ContentProvider::builder()
//!     .primary(Arc::new(openai), GenerationSettings::new(500, 0.7))
//!     .store(store)
//!     .build()?;
//!
//! let quote = provider.generate(PromptKey::Quote).await;
//! println!("{}", quote.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fallback;
mod gemini;
mod openai;
mod prompts;
mod provider;

pub use fallback::FallbackTable;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use prompts::PromptTemplates;
pub use provider::{ContentProvider, ContentProviderBuilder, GenerationSettings};
