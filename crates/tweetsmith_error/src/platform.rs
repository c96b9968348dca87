//! Social platform error types.

/// Failure modes of the social platform API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// Transport failure.
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Platform answered with a non-success status.
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or platform message
        message: String,
    },
    /// Response body could not be decoded.
    #[display("Malformed response: {}", _0)]
    Parse(String),
    /// Account or item does not exist.
    #[display("Not found: {}", _0)]
    NotFound(String),
    /// Platform accepted the request but reported errors instead of data.
    #[display("Rejected: {}", _0)]
    Rejected(String),
}

/// Platform error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// The kind of error that occurred
    pub kind: PlatformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new PlatformError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
