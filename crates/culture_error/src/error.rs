//! Top-level error wrapper types.

use crate::{ConfigError, DatabaseError, HttpError, JsonError};

/// The union of every error the workspace can propagate.
///
/// # Examples
///
/// ```
/// use culture_error::{CultureError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: CultureError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CultureErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Database error
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Culture error with kind discrimination.
///
/// # Examples
///
/// ```
/// use culture_error::{CultureErrorKind, CultureResult, ConfigError};
///
/// fn might_fail() -> CultureResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), CultureErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Culture Error: {}", _0)]
pub struct CultureError(Box<CultureErrorKind>);

impl CultureError {
    /// Create a new error from a kind.
    pub fn new(kind: CultureErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CultureErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CultureErrorKind
impl<T> From<T> for CultureError
where
    T: Into<CultureErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Culture operations.
pub type CultureResult<T> = std::result::Result<T, CultureError>;
