//! SMS notifications

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::endpoints;
use crate::client::EagleBirth;
use crate::error::Result;
use crate::request::{Fields, Files};

/// Delivery channel for an SMS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SendingMethod {
    /// Carrier SMS
    NormalSms,
    /// Email-to-SMS gateway
    EmailToSms,
}

/// SMS to send
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendSms {
    /// Recipient in international format
    pub phone_number: String,
    /// Text
    pub message: String,
    /// Delivery channel, server default when unset
    pub sending_method: Option<SendingMethod>,
    /// Upstream provider name
    pub provider: Option<String>,
}

impl SendSms {
    /// SMS with only the required fields set
    pub fn new(phone_number: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            message: message.into(),
            ..Default::default()
        }
    }
}

/// SMS resource
#[derive(Debug, Clone, Copy)]
pub struct Sms<'a> {
    client: &'a EagleBirth,
}

impl<'a> Sms<'a> {
    pub(crate) fn new(client: &'a EagleBirth) -> Self {
        Self { client }
    }

    /// Send an SMS
    #[instrument(skip_all)]
    pub async fn send(&self, params: &SendSms) -> Result<Value> {
        let fields = Fields::from_serialize(params)?;
        self.client
            .call(endpoints::SEND_SMS, fields, Files::new())
            .await
    }

    /// SMS pricing, optionally for a single destination number
    #[instrument(skip(self))]
    pub async fn get_prices(&self, phone_number: Option<&str>) -> Result<Value> {
        let fields = Fields::new().with("phone_number", phone_number);
        self.client
            .call(endpoints::SMS_PRICES, fields, Files::new())
            .await
    }
}
