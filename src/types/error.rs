//! Error types for flagstand

use hyper::StatusCode;

/// Main error type for flagstand operations
///
/// Domain errors carry no internal detail; `token()` yields the short
/// machine-readable body the HTTP layer returns, so clients never see
/// configuration or stack information.
#[derive(Debug, thiserror::Error)]
pub enum FlagstandError {
    #[error("missing required fields")]
    MissingFields,

    #[error("password rejected by policy rule '{0}'")]
    WeakPassword(&'static str),

    #[error("username already registered")]
    DuplicateUsername,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("user not found")]
    UserNotFound,

    #[error("missing flag in request body")]
    MissingFlag,

    #[error("submitted string matches no known flag")]
    InvalidFlag,

    #[error("flag already claimed by this user")]
    AlreadyClaimed,

    #[error("document store unavailable: {0}")]
    Store(String),

    #[error("partial persist failure: {0}")]
    PartialPersist(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl FlagstandError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::WeakPassword(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateUsername => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::MissingToken | Self::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::MissingFlag | Self::InvalidFlag | Self::AlreadyClaimed => StatusCode::BAD_REQUEST,
            Self::Store(_)
            | Self::PartialPersist(_)
            | Self::Config(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable token for HTTP error bodies
    ///
    /// The front end maps these to localized messages.
    pub fn token(&self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::WeakPassword(_) => "weak_password",
            Self::DuplicateUsername => "username_exists",
            Self::InvalidCredentials => "invalid_credentials",
            Self::MissingToken => "missing_token",
            Self::InvalidToken(_) => "invalid_token",
            Self::UserNotFound => "user_not_found",
            Self::MissingFlag => "missing_flag",
            Self::InvalidFlag => "invalid_flag",
            Self::AlreadyClaimed => "already_claimed",
            Self::Store(_) => "store_unavailable",
            Self::PartialPersist(_) => "partial_persist_failure",
            Self::Config(_) => "server_misconfigured",
            Self::Internal(_) => "internal_error",
        }
    }
}

// Implement From conversions for common error types

impl From<std::io::Error> for FlagstandError {
    fn from(err: std::io::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<serde_json::Error> for FlagstandError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for FlagstandError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::InvalidToken(err.to_string())
    }
}

/// Result type alias for flagstand operations
pub type Result<T> = std::result::Result<T, FlagstandError>;
