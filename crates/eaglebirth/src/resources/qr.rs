//! QR code generation

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::{endpoints, Image};
use crate::client::EagleBirth;
use crate::error::Result;
use crate::request::{Fields, Files};

/// QR code to generate
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateQr {
    /// Encoded content
    pub text: String,
    /// Logo placed in the middle of the code
    #[serde(skip)]
    pub image: Option<Image>,
    /// Foreground color, e.g. `#000000`
    pub color: Option<String>,
    /// Background color
    pub background_color: Option<String>,
    /// Code style
    pub qr_type: Option<String>,
}

impl GenerateQr {
    /// QR code for `text` with server defaults
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// QR code resource
#[derive(Debug, Clone, Copy)]
pub struct QrCode<'a> {
    client: &'a EagleBirth,
}

impl<'a> QrCode<'a> {
    pub(crate) fn new(client: &'a EagleBirth) -> Self {
        Self { client }
    }

    /// Generate a QR code
    #[instrument(skip_all)]
    pub async fn generate(&self, params: &GenerateQr) -> Result<Value> {
        let mut fields = Fields::from_serialize(params)?;
        let mut files = Files::new();

        if let Some(image) = params.image.clone() {
            image.attach("image", "image_type", &mut fields, &mut files);
        }

        self.client
            .call(endpoints::GENERATE_QR, fields, files)
            .await
    }
}
