//! WhatsApp notifications

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::endpoints;
use crate::client::EagleBirth;
use crate::error::Result;
use crate::request::{Fields, Files};

const DEFAULT_TEMPLATE: &str = "normal_message";

/// WhatsApp message to send
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendWhatsApp {
    /// Recipient in international format
    pub phone_number: String,
    /// Text
    pub message: String,
    /// Message template, `normal_message` when unset
    pub template: Option<String>,
}

impl SendWhatsApp {
    /// Message with only the required fields set
    pub fn new(phone_number: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            message: message.into(),
            template: None,
        }
    }
}

/// WhatsApp resource
#[derive(Debug, Clone, Copy)]
pub struct WhatsApp<'a> {
    client: &'a EagleBirth,
}

impl<'a> WhatsApp<'a> {
    pub(crate) fn new(client: &'a EagleBirth) -> Self {
        Self { client }
    }

    /// Send a WhatsApp message
    #[instrument(skip_all)]
    pub async fn send(&self, params: &SendWhatsApp) -> Result<Value> {
        let mut fields = Fields::from_serialize(params)?;
        fields.insert_default("template", DEFAULT_TEMPLATE);
        self.client
            .call(endpoints::SEND_WHATSAPP, fields, Files::new())
            .await
    }
}
