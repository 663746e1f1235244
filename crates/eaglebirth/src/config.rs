//! Client configuration and credential handling

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};

use crate::error::{Error, Result};

/// Base URL used for `eb_live_` keys
pub const PRODUCTION_URL: &str = "https://eaglebirth.com/api";
/// Base URL used for `eb_test_` keys
pub const SANDBOX_URL: &str = "https://sandbox.eaglebirth.com/api";
/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const SANDBOX_PREFIX: &str = "eb_test_";
const PRODUCTION_PREFIX: &str = "eb_live_";

/// Platform environment selected by the API key prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// `eb_test_` keys
    Sandbox,
    /// `eb_live_` keys
    Production,
}

impl Environment {
    /// Default base URL of this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_URL,
            Self::Production => PRODUCTION_URL,
        }
    }
}

/// Validated EagleBirth API key
///
/// `Debug` never prints the secret part of the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    key: String,
    environment: Environment,
}

impl ApiKey {
    /// Parse an API key, classifying it by prefix
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the key starts with neither
    /// `eb_test_` nor `eb_live_`
    pub fn parse(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let environment = if key.starts_with(SANDBOX_PREFIX) {
            Environment::Sandbox
        } else if key.starts_with(PRODUCTION_PREFIX) {
            Environment::Production
        } else {
            return Err(Error::validation(format!(
                "Invalid API key format. Must start with {SANDBOX_PREFIX} or {PRODUCTION_PREFIX}"
            )));
        };

        Ok(Self { key, environment })
    }

    /// Environment the key belongs to
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Raw key, as sent in the `Authorization` header
    pub fn expose(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.environment {
            Environment::Sandbox => SANDBOX_PREFIX,
            Environment::Production => PRODUCTION_PREFIX,
        };
        f.debug_struct("ApiKey")
            .field("key", &format!("{prefix}<redacted>"))
            .field("environment", &self.environment)
            .finish()
    }
}

/// Serializable client configuration
///
/// ```toml
/// api_key = "eb_test_..."
/// base_url = "http://localhost:8000/api"  # optional
/// timeout = 10000                         # optional, milliseconds
/// ```
#[serde_as]
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key
    pub api_key: String,
    /// Base URL override; when unset it is derived from the key prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Config with only an API key set
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout: None,
        }
    }

    /// Load a config from a file (format picked from the extension)
    ///
    /// Only the file is read; no environment variables are consulted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the file is missing or malformed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Resolve the base URL: explicit override wins, otherwise the key's environment
    pub(crate) fn resolve_base_url(&self, api_key: &ApiKey) -> Result<url::Url> {
        let raw = match &self.base_url {
            Some(url) => url.as_str(),
            None => api_key.environment().base_url(),
        };

        Ok(url::Url::parse(raw)?)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
