//! Face detection, face comparison and OCR

use serde_json::Value;
use tracing::instrument;

use super::{endpoints, Endpoint, Image};
use crate::client::EagleBirth;
use crate::error::Result;
use crate::request::{Fields, Files};

/// Vision resource
#[derive(Debug, Clone, Copy)]
pub struct Vision<'a> {
    client: &'a EagleBirth,
}

impl<'a> Vision<'a> {
    pub(crate) fn new(client: &'a EagleBirth) -> Self {
        Self { client }
    }

    /// Face details (landmarks, attributes) found in one image
    #[instrument(skip_all, fields(image_type = image.type_name()))]
    pub async fn extract_face_details(&self, image: Image) -> Result<Value> {
        self.single_image(endpoints::FACE_DETAILS, image).await
    }

    /// Compare the faces found in two images
    #[instrument(skip_all)]
    pub async fn compare_faces(&self, image1: Image, image2: Image) -> Result<Value> {
        let mut fields = Fields::new();
        let mut files = Files::new();
        image1.attach("image1", "image1_type", &mut fields, &mut files);
        image2.attach("image2", "image2_type", &mut fields, &mut files);

        self.client
            .call(endpoints::COMPARE_FACES, fields, files)
            .await
    }

    /// Text found in an image
    #[instrument(skip_all, fields(image_type = image.type_name()))]
    pub async fn extract_text(&self, image: Image) -> Result<Value> {
        self.single_image(endpoints::EXTRACT_TEXT, image).await
    }

    async fn single_image(&self, endpoint: Endpoint, image: Image) -> Result<Value> {
        let mut fields = Fields::new();
        let mut files = Files::new();
        image.attach("image", "image_type", &mut fields, &mut files);

        self.client.call(endpoint, fields, files).await
    }
}
