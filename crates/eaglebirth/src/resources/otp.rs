//! One-time password delivery and validation

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::endpoints;
use crate::client::EagleBirth;
use crate::error::Result;
use crate::request::{FieldValue, Fields, Files};

const DEFAULT_CODE_LENGTH: u32 = 6;
const DEFAULT_TIMEOUT_SECS: u32 = 180;
const DEFAULT_TRIALS: u32 = 3;

/// Channel an OTP is delivered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationType {
    /// Code sent by email
    Email,
    /// Code sent by SMS
    Sms,
    /// Code sent over WhatsApp
    Whatsapp,
    /// User sends the code back over WhatsApp
    WhatsappReturn,
}

/// OTP to send
#[derive(Debug, Clone, Serialize)]
pub struct SendOtp {
    /// Delivery channel
    pub validation_type: ValidationType,
    /// Recipient address for [`ValidationType::Email`]
    pub email: Option<String>,
    /// Recipient number for the phone channels
    pub phone_number: Option<String>,
    /// Upstream provider name
    pub provider: Option<String>,
    /// Digits in the code, 6 when unset or 0
    pub code_length: Option<u32>,
    /// Seconds before the code expires, 180 when unset or 0
    pub timeout: Option<u32>,
    /// Allowed attempts, 3 when unset or 0
    pub trials: Option<u32>,
}

impl SendOtp {
    /// OTP over `validation_type` with default length, timeout and trials
    pub fn new(validation_type: ValidationType) -> Self {
        Self {
            validation_type,
            email: None,
            phone_number: None,
            provider: None,
            code_length: None,
            timeout: None,
            trials: None,
        }
    }

    /// OTP sent by email
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::new(ValidationType::Email)
        }
    }

    /// OTP sent by SMS
    pub fn sms(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            ..Self::new(ValidationType::Sms)
        }
    }
}

/// OTP resource
#[derive(Debug, Clone, Copy)]
pub struct Otp<'a> {
    client: &'a EagleBirth,
}

impl<'a> Otp<'a> {
    pub(crate) fn new(client: &'a EagleBirth) -> Self {
        Self { client }
    }

    /// Send a code; the response carries the `code_id` used to validate it
    #[instrument(skip_all, fields(validation_type = ?params.validation_type))]
    pub async fn send(&self, params: &SendOtp) -> Result<Value> {
        let mut fields = Fields::from_serialize(params)?;
        apply_defaults(&mut fields);

        self.client
            .call(endpoints::SEND_OTP, fields, Files::new())
            .await
    }

    /// Validate a code the user entered
    #[instrument(skip(self, code))]
    pub async fn validate(&self, code_id: &str, code: &str) -> Result<Value> {
        let fields = Fields::new().with("code_id", code_id).with("code", code);
        self.client
            .call(endpoints::VALIDATE_OTP, fields, Files::new())
            .await
    }

    /// Whether the code behind `code_id` was already validated
    #[instrument(skip(self))]
    pub async fn check_validated(&self, code_id: &str) -> Result<Value> {
        let fields = Fields::new().with("code_id", code_id);
        self.client
            .call(endpoints::CHECK_VALIDATED_OTP, fields, Files::new())
            .await
    }
}

/// Fill code length, timeout and trials when unset or zero
fn apply_defaults(fields: &mut Fields) {
    for (key, default) in [
        ("code_length", DEFAULT_CODE_LENGTH),
        ("timeout", DEFAULT_TIMEOUT_SECS),
        ("trials", DEFAULT_TRIALS),
    ] {
        if fields.get(key) == Some(&FieldValue::Int(0)) {
            fields.remove(key);
        }
        fields.insert_default(key, default);
    }
}
