//! Email notifications

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::endpoints;
use crate::client::EagleBirth;
use crate::error::Result;
use crate::request::{Fields, Files};

/// Email to send
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendEmail {
    /// Recipient address
    pub email: String,
    /// Subject line
    pub subject: String,
    /// Body
    pub message: String,
    /// Reply-to address
    pub reply_to: Option<String>,
    /// Header shown above the body
    pub header: Option<String>,
    /// Greeting line
    pub salutation: Option<String>,
}

impl SendEmail {
    /// Email with only the required fields set
    pub fn new(
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Email resource
#[derive(Debug, Clone, Copy)]
pub struct Email<'a> {
    client: &'a EagleBirth,
}

impl<'a> Email<'a> {
    pub(crate) fn new(client: &'a EagleBirth) -> Self {
        Self { client }
    }

    /// Send an email
    #[instrument(skip_all)]
    pub async fn send(&self, params: &SendEmail) -> Result<Value> {
        let fields = Fields::from_serialize(params)?;
        self.client
            .call(endpoints::SEND_EMAIL, fields, Files::new())
            .await
    }
}
