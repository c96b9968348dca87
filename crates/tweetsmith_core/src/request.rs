//! Text completion requests.

use serde::{Deserialize, Serialize};

/// A single-turn completion request sent to a text backend.
///
/// # Examples
///
/// ```
/// use tweetsmith_core::CompletionRequest;
///
/// let request = CompletionRequest {
///     system: None,
///     prompt: "Generate a short quote".to_string(),
///     max_tokens: 500,
///     temperature: 0.7,
/// };
///
/// assert_eq!(request.max_tokens, 500);
/// assert!(request.system.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System instruction framing the bot persona
    pub system: Option<String>,
    /// User prompt
    pub prompt: String,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}
