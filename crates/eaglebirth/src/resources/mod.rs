//! Resource wrappers
//!
//! Each operation is an [`Endpoint`] from the table in [`endpoints`] plus a
//! parameter struct whose serde field names are the API's wire names. The
//! wrappers only assemble [`Fields`] and [`Files`] and hand them to
//! [`EagleBirth::dispatch`].

use serde::Serializer;
use serde_json::Value;

use crate::client::EagleBirth;
use crate::error::Result;
use crate::request::{FileSource, Fields, Files, Method};

pub mod endpoints;

mod email;
mod otp;
mod qr;
mod sms;
mod storage;
mod users;
mod vision;
mod whatsapp;

pub use email::{Email, SendEmail};
pub use otp::{Otp, SendOtp, ValidationType};
pub use qr::{GenerateQr, QrCode};
pub use sms::{SendSms, SendingMethod, Sms};
pub use storage::{
    CreateDirectory, Directory, DirectoryRef, File, FileRef, ListDirectory, Privacy, Storage,
    UpdateDirectoryPassword, UpdateDirectoryPrivacy, UpdateFilePassword, UpdateFilePrivacy,
    UploadFile,
};
pub use users::{
    CreateUser, GetUser, ListUsers, ResetPassword, SignInUser, UpdateUser, UserRef, UserStatus,
    Users,
};
pub use vision::Vision;
pub use whatsapp::{SendWhatsApp, WhatsApp};

/// One remote operation: verb plus path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// HTTP verb
    pub method: Method,
    /// Path relative to the base URL
    pub path: &'static str,
}

impl Endpoint {
    /// POST endpoint
    pub const fn post(path: &'static str) -> Self {
        Self {
            method: Method::Post,
            path,
        }
    }

    /// GET endpoint
    pub const fn get(path: &'static str) -> Self {
        Self {
            method: Method::Get,
            path,
        }
    }
}

impl EagleBirth {
    /// Dispatch to a table endpoint
    pub(crate) async fn call(
        &self,
        endpoint: Endpoint,
        fields: Fields,
        files: Files,
    ) -> Result<Value> {
        self.dispatch(endpoint.method, endpoint.path, fields, files)
            .await
    }
}

/// Image argument of the QR and vision operations
///
/// A link is sent as a text field, a file as a multipart part. The matching
/// `*_type` field (`link` / `object`) is derived from the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    /// Publicly reachable image URL
    Link(String),
    /// Image uploaded with the request
    File(FileSource),
}

impl Image {
    /// Image by URL
    pub fn link(url: impl Into<String>) -> Self {
        Self::Link(url.into())
    }

    /// Image read from disk at dispatch time
    pub fn path(path: impl Into<std::path::PathBuf>) -> Self {
        Self::File(FileSource::path(path))
    }

    /// Image from memory
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::File(FileSource::bytes(bytes))
    }

    /// Wire value of the `*_type` field
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Link(_) => "link",
            Self::File(_) => "object",
        }
    }

    pub(crate) fn attach(
        self,
        key: &str,
        type_key: &str,
        fields: &mut Fields,
        files: &mut Files,
    ) {
        fields.insert(type_key, self.type_name());
        match self {
            Self::Link(url) => fields.insert(key, url),
            Self::File(source) => files.insert(key, source),
        }
    }
}

impl From<FileSource> for Image {
    fn from(source: FileSource) -> Self {
        Self::File(source)
    }
}

/// Serialize a flag as the API's `yes` / `no`
pub(crate) fn yes_no<S>(value: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "yes" } else { "no" })
}
