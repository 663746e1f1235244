//! Error types for the EagleBirth SDK
//!
//! Every failure surfaced by the client is exactly one [`Error`] variant. The
//! variant doubles as the error kind; [`Error::kind`] returns it as a plain
//! [`ErrorKind`] for callers that only want to branch.

use thiserror::Error;

/// Result type for EagleBirth SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when a response body carries neither `message` nor `detail`
pub(crate) const FALLBACK_MESSAGE: &str = "API request failed";

/// Message used when a request was sent but no response came back
pub(crate) const NO_RESPONSE_MESSAGE: &str = "no response received";

/// Classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credential rejected (401 / 403)
    Authentication,
    /// Too many requests (429)
    RateLimit,
    /// Bad local input or a remote 4xx
    Validation,
    /// Remote server failure
    Api,
    /// Request sent but no response received
    Transport,
    /// Anything else that stopped the request from being built or sent
    Generic,
}

/// Error types that can occur when using the EagleBirth SDK
#[derive(Debug, Error)]
pub enum Error {
    /// API key was rejected
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message from the API
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Error message from the API
        message: String,
        /// Seconds to wait before retrying, from the `retry-after` header
        retry_after: Option<u64>,
    },

    /// Invalid input, either detected locally or rejected by the API
    #[error("Validation error: {message}")]
    Validation {
        /// Error message
        message: String,
    },

    /// API returned a server error
    #[error("API error ({status}): {message}")]
    Api {
        /// Error message from the API
        message: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Request was sent but no response arrived
    #[error("Transport error: {message}")]
    Transport {
        /// Error message
        message: String,
        /// Underlying transport failure
        #[source]
        source: reqwest::Error,
    },

    /// Request could not be built or sent
    #[error("{message}")]
    Generic {
        /// Error message
        message: String,
        /// Underlying failure, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Build a [`Error::Validation`]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Build a [`Error::Generic`] wrapping `source`
    pub fn generic<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Generic {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Api { .. } => ErrorKind::Api,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Generic { .. } => ErrorKind::Generic,
        }
    }

    /// Human readable message, without the kind prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message }
            | Self::RateLimit { message, .. }
            | Self::Validation { message }
            | Self::Api { message, .. }
            | Self::Transport { message, .. }
            | Self::Generic { message, .. } => message,
        }
    }

    /// HTTP status code of an [`Error::Api`]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of an [`Error::Api`]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Retry hint in seconds of an [`Error::RateLimit`]
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Validation {
            message: format!("Invalid client configuration: {err}"),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Validation {
            message: format!("Invalid base URL: {err}"),
        }
    }
}
