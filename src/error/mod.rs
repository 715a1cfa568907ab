use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or missing configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// Synthesis API failure
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Result cache failure
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Result polling failure
    #[error("Polling error: {0}")]
    Poll(#[from] PollError<ApiError>),

    /// Form validation failure
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal {
        /// What went wrong
        message: String,
    },
}

/// Synthesis API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// No result for the id
    #[error("Result not found or expired: {request_id}")]
    NotFound {
        /// Requested id
        request_id: String,
    },

    /// Request could not be built
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// What is wrong
        message: String,
    },

    /// Response body could not be decoded
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Decoder message
        message: String,
    },

    /// Request exceeded the configured timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout
        timeout_ms: u64,
    },

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Key was already written
    #[error("Cache key already written: {key}")]
    Occupied {
        /// The occupied key
        key: String,
    },

    /// Storage backend failure
    #[error("Cache backend failed: {message}")]
    Backend {
        /// Backend message
        message: String,
    },
}

/// Polling errors.
///
/// `Exhausted` is the timeout outcome and is kept apart from `Check`, which
/// carries a failure reported by the check function itself.
#[derive(Debug, Error)]
pub enum PollError<E: std::error::Error + 'static> {
    /// Attempt bound reached without the condition holding
    #[error("Polling gave up after {attempts} attempts")]
    Exhausted {
        /// Checks performed
        attempts: u32,
    },

    /// Cancelled by the owner
    #[error("Polling cancelled")]
    Cancelled,

    /// The check itself failed
    #[error("Check failed: {0}")]
    Check(#[source] E),
}

/// Form field identifiers used as keys of [`FieldErrors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    /// The host organism field.
    HostOrganism,
    /// The desired trait field.
    DesiredTrait,
}

impl FormField {
    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::HostOrganism => "host_organism",
            FormField::DesiredTrait => "desired_trait",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any earlier one.
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for a field, if any.
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// True when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over fields and messages in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{} - {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for synthesis API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
