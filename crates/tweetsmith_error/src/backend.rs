//! Text generation backend error types.

/// Failure modes of a generative text backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BackendErrorKind {
    /// Request never reached the provider or the connection dropped.
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Provider answered with a non-success status.
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },
    /// Response body could not be decoded.
    #[display("Malformed response: {}", _0)]
    Parse(String),
    /// Provider returned no usable text.
    #[display("Empty response from provider")]
    EmptyResponse,
    /// API key or similar credential is absent.
    #[display("Missing credentials: {}", _0)]
    MissingCredentials(String),
}

impl BackendErrorKind {
    /// Whether the provider refused the request for quota or rate reasons.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetsmith_error::BackendErrorKind;
    ///
    /// let kind = BackendErrorKind::Api { status: 429, message: "slow down".into() };
    /// assert!(kind.is_quota());
    /// assert!(!BackendErrorKind::EmptyResponse.is_quota());
    /// ```
    pub fn is_quota(&self) -> bool {
        match self {
            Self::Api { status, message } => {
                *status == 429 || message.to_ascii_lowercase().contains("quota")
            }
            _ => false,
        }
    }
}

/// Backend error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", kind, line, file)]
pub struct BackendError {
    /// The kind of error that occurred
    pub kind: BackendErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BackendErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
