//! Top-level error wrapper types.

use crate::{BackendError, ConfigError, DatabaseError, PlatformError, ServerError};

/// Aggregate of every error the Tweetsmith crates can produce.
///
/// # Examples
///
/// ```
/// use tweetsmith_error::{PlatformError, PlatformErrorKind, TweetsmithError};
///
/// let platform_err = PlatformError::new(PlatformErrorKind::Http("Connection failed".into()));
/// let err: TweetsmithError = platform_err.into();
/// assert!(format!("{}", err).contains("Connection failed"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TweetsmithErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Text generation backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Social platform error
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Activity store error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Bot server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Tweetsmith error with kind discrimination.
///
/// # Examples
///
/// ```
/// use tweetsmith_error::{TweetsmithResult, ConfigError};
///
/// fn might_fail() -> TweetsmithResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tweetsmith Error: {}", _0)]
pub struct TweetsmithError(Box<TweetsmithErrorKind>);

impl TweetsmithError {
    /// Create a new error from a kind.
    pub fn new(kind: TweetsmithErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TweetsmithErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TweetsmithErrorKind
impl<T> From<T> for TweetsmithError
where
    T: Into<TweetsmithErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Tweetsmith operations.
pub type TweetsmithResult<T> = std::result::Result<T, TweetsmithError>;
