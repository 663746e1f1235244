//! EagleBirth API client and request dispatcher

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use tracing::instrument;

use crate::config::{ApiKey, ClientConfig, Environment, DEFAULT_TIMEOUT};
use crate::error::{Error, Result, NO_RESPONSE_MESSAGE};
use crate::request::{multipart_form, Fields, Files, Method};
use crate::resources::{Email, Otp, QrCode, Sms, Storage, Users, Vision, WhatsApp};
use crate::response::{classify_status, decode_body};

/// User agent sent with every request
pub const USER_AGENT_VALUE: &str = concat!("EagleBirth-Rust/", env!("CARGO_PKG_VERSION"));

/// Client for the EagleBirth API
///
/// Cheap to clone; clones share the underlying connection pool. All state is
/// fixed at construction, so a single client can serve concurrent calls.
#[derive(Clone)]
pub struct EagleBirth {
    api_key: ApiKey,
    base_url: url::Url,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for EagleBirth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EagleBirth")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl EagleBirth {
    /// Create a client from an API key, using the default base URL and timeout
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the key prefix is not recognized
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> eaglebirth::Result<()> {
    /// let client = eaglebirth::EagleBirth::new("eb_test_your_api_key")?;
    /// let response = client.sms().get_prices(Some("+15550100")).await?;
    /// println!("{response}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Create a client from a [`ClientConfig`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a bad key or base URL
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        EagleBirthBuilder { config, http_client: None }.build()
    }

    /// Create a client builder
    pub fn builder(api_key: impl Into<String>) -> EagleBirthBuilder {
        EagleBirthBuilder {
            config: ClientConfig::new(api_key),
            http_client: None,
        }
    }

    /// Environment selected by the API key
    pub fn environment(&self) -> Environment {
        self.api_key.environment()
    }

    /// Resolved base URL, in `url::Url` normalized form
    ///
    /// A bare-host override such as `http://127.0.0.1:1234` is reported with
    /// a trailing slash; requests are unaffected since endpoint paths are
    /// joined with exactly one `/`.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Email notifications
    pub fn email(&self) -> Email<'_> {
        Email::new(self)
    }

    /// SMS notifications
    pub fn sms(&self) -> Sms<'_> {
        Sms::new(self)
    }

    /// WhatsApp notifications
    pub fn whatsapp(&self) -> WhatsApp<'_> {
        WhatsApp::new(self)
    }

    /// One-time passwords
    pub fn otp(&self) -> Otp<'_> {
        Otp::new(self)
    }

    /// QR code generation
    pub fn qr(&self) -> QrCode<'_> {
        QrCode::new(self)
    }

    /// Face detection, comparison and OCR
    pub fn vision(&self) -> Vision<'_> {
        Vision::new(self)
    }

    /// Cloud storage
    pub fn storage(&self) -> Storage<'_> {
        Storage::new(self)
    }

    /// App user management
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Send one request and return the decoded response body
    ///
    /// Without files, `GET` sends `fields` as query parameters and `POST` as a
    /// JSON body. With at least one file the body is multipart for either
    /// verb. Null fields are never sent.
    ///
    /// # Errors
    ///
    /// Every failure is classified into one [`Error`] variant:
    /// - 401 / 403: [`Error::Authentication`]
    /// - 429: [`Error::RateLimit`], with the `retry-after` header when present
    /// - other 4xx, or an unreadable upload file: [`Error::Validation`]
    /// - 5xx and other non-success statuses: [`Error::Api`]
    /// - no response: [`Error::Transport`]
    /// - request could not be built: [`Error::Generic`]
    #[instrument(skip(self, fields, files), fields(base_url = %self.base_url))]
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        fields: Fields,
        files: Files,
    ) -> Result<Value> {
        let url = self.endpoint_url(path);

        let mut request = self
            .http_client
            .request(method.as_reqwest(), &url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key.expose()))
            .header(USER_AGENT, USER_AGENT_VALUE)
            .timeout(self.timeout);

        request = if !files.is_empty() {
            tracing::debug!(
                "Encoding {} fields and {} files as multipart",
                fields.len(),
                files.len()
            );
            request.multipart(multipart_form(&fields, files).await?)
        } else {
            match method {
                Method::Get => request.query(&fields.to_query()),
                Method::Post => request.json(&fields.to_json()),
            }
        };

        tracing::debug!("Sending {} request to {}", method, url);
        let response = request.send().await.map_err(|err| {
            let err = classify_send_error(err);
            tracing::warn!("{} {} failed before a response: {}", method, url, err);
            err
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.bytes().await.map_err(no_response)?;

        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            let err = classify_status(status.as_u16(), &headers, &raw_body);
            tracing::warn!("{} {} failed: {}", method, url, err);
            return Err(err);
        }

        Ok(decode_body(&raw_body))
    }
}

fn no_response(source: reqwest::Error) -> Error {
    Error::Transport {
        message: NO_RESPONSE_MESSAGE.to_string(),
        source,
    }
}

/// Classify a failure from `send`, where no status is available
fn classify_send_error(err: reqwest::Error) -> Error {
    if err.is_builder() {
        Error::generic(format!("Could not build request: {err}"), err)
    } else {
        no_response(err)
    }
}

/// Builder for [`EagleBirth`]
#[derive(Debug)]
pub struct EagleBirthBuilder {
    config: ClientConfig,
    http_client: Option<reqwest::Client>,
}

impl EagleBirthBuilder {
    /// Override the base URL chosen from the key prefix
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the per-request timeout (default 30 seconds)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Use a pre-configured reqwest client (proxies, TLS roots, ...)
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a bad key or base URL
    pub fn build(self) -> Result<EagleBirth> {
        let api_key = ApiKey::parse(self.config.api_key.clone())?;
        let base_url = self.config.resolve_base_url(&api_key)?;
        let timeout = self.config.timeout.unwrap_or(DEFAULT_TIMEOUT);

        tracing::debug!(
            environment = ?api_key.environment(),
            "Creating EagleBirth client at {}",
            base_url
        );

        Ok(EagleBirth {
            api_key,
            base_url,
            timeout,
            http_client: self.http_client.unwrap_or_default(),
        })
    }
}
