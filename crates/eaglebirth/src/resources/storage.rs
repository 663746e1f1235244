//! Cloud storage: directories and files

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::{endpoints, yes_no};
use crate::client::EagleBirth;
use crate::error::Result;
use crate::request::{FileSource, Fields, Files};

/// Visibility of a directory or file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Privacy {
    /// Requires a token or password to read
    #[serde(rename = "yes")]
    Private,
    /// Readable by anyone with the link
    #[default]
    #[serde(rename = "no")]
    Public,
}

/// Directory addressed by id or by path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DirectoryRef {
    /// Directory id
    #[serde(rename = "directory_id")]
    Id(String),
    /// Directory path, e.g. `invoices/2024`
    #[serde(rename = "path")]
    Path(String),
}

/// File addressed by id or by path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FileRef {
    /// File id
    #[serde(rename = "file_id")]
    Id(String),
    /// File path
    #[serde(rename = "path")]
    Path(String),
}

/// Directory to create
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDirectory {
    /// Directory path
    pub path: String,
    /// Visibility
    pub private: Privacy,
    /// Password protecting the directory
    pub directory_password: Option<String>,
}

/// Directory listing request
#[derive(Debug, Clone, Serialize)]
pub struct ListDirectory {
    /// Directory to list
    #[serde(flatten)]
    pub directory: DirectoryRef,
    /// Access token of a private directory
    pub token: Option<String>,
    /// Password of a protected directory
    pub directory_password: Option<String>,
}

/// Directory password change
#[derive(Debug, Clone, Serialize)]
pub struct UpdateDirectoryPassword {
    /// Directory to update
    #[serde(flatten)]
    pub directory: DirectoryRef,
    /// New password
    pub directory_password: String,
}

/// Directory visibility change
#[derive(Debug, Clone, Serialize)]
pub struct UpdateDirectoryPrivacy {
    /// Directory to update
    #[serde(flatten)]
    pub directory: DirectoryRef,
    /// New visibility
    pub is_private: Privacy,
}

/// File to upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadFile {
    /// Content
    #[serde(skip)]
    pub file: FileSource,
    /// Target directory path
    pub path: String,
    /// Stored file name, server picks one when unset
    pub filename: Option<String>,
    /// Visibility
    pub private: Privacy,
    /// Password of the target directory
    pub directory_password: Option<String>,
    /// Password protecting the file
    pub file_password: Option<String>,
}

impl UploadFile {
    /// Public upload of `file` into `path`
    pub fn new(file: impl Into<FileSource>, path: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            path: path.into(),
            filename: None,
            private: Privacy::Public,
            directory_password: None,
            file_password: None,
        }
    }
}

/// File password change
#[derive(Debug, Clone, Serialize)]
pub struct UpdateFilePassword {
    /// File to update
    #[serde(flatten)]
    pub file: FileRef,
    /// New password
    pub password: String,
}

/// File visibility change
#[derive(Debug, Clone, Serialize)]
pub struct UpdateFilePrivacy {
    /// File to update
    #[serde(flatten)]
    pub file: FileRef,
    /// New visibility
    pub private: Privacy,
    /// Issue a new access token
    #[serde(serialize_with = "yes_no")]
    pub refresh_token: bool,
}

/// Storage resource
#[derive(Debug, Clone, Copy)]
pub struct Storage<'a> {
    client: &'a EagleBirth,
}

impl<'a> Storage<'a> {
    pub(crate) fn new(client: &'a EagleBirth) -> Self {
        Self { client }
    }

    /// Directory operations
    pub fn directory(&self) -> Directory<'a> {
        Directory {
            client: self.client,
        }
    }

    /// File operations
    pub fn file(&self) -> File<'a> {
        File {
            client: self.client,
        }
    }
}

/// Directory operations
#[derive(Debug, Clone, Copy)]
pub struct Directory<'a> {
    client: &'a EagleBirth,
}

impl Directory<'_> {
    /// Create a directory
    #[instrument(skip_all, fields(path = %params.path))]
    pub async fn create(&self, params: &CreateDirectory) -> Result<Value> {
        let fields = Fields::from_serialize(params)?;
        self.client
            .call(endpoints::CREATE_DIRECTORY, fields, Files::new())
            .await
    }

    /// Delete a directory
    #[instrument(skip(self))]
    pub async fn delete(&self, directory: &DirectoryRef) -> Result<Value> {
        let fields = Fields::from_serialize(directory)?;
        self.client
            .call(endpoints::DELETE_DIRECTORY, fields, Files::new())
            .await
    }

    /// List a directory
    #[instrument(skip_all, fields(directory = ?params.directory))]
    pub async fn list_content(&self, params: &ListDirectory) -> Result<Value> {
        let endpoint = match params.directory {
            DirectoryRef::Path(_) => endpoints::LIST_DIRECTORY,
            DirectoryRef::Id(_) => endpoints::LIST_DIRECTORY_BY_ID,
        };
        let fields = Fields::from_serialize(params)?;
        self.client.call(endpoint, fields, Files::new()).await
    }

    /// Change a directory password
    #[instrument(skip_all, fields(directory = ?params.directory))]
    pub async fn update_password(&self, params: &UpdateDirectoryPassword) -> Result<Value> {
        let fields = Fields::from_serialize(params)?;
        self.client
            .call(endpoints::UPDATE_DIRECTORY_PASSWORD, fields, Files::new())
            .await
    }

    /// Change directory visibility
    #[instrument(skip_all, fields(directory = ?params.directory))]
    pub async fn update_privacy(&self, params: &UpdateDirectoryPrivacy) -> Result<Value> {
        let fields = Fields::from_serialize(params)?;
        self.client
            .call(endpoints::UPDATE_DIRECTORY_PRIVACY, fields, Files::new())
            .await
    }
}

/// File operations
#[derive(Debug, Clone, Copy)]
pub struct File<'a> {
    client: &'a EagleBirth,
}

impl File<'_> {
    /// Upload a file
    #[instrument(skip_all, fields(path = %params.path))]
    pub async fn upload(&self, params: &UploadFile) -> Result<Value> {
        let fields = Fields::from_serialize(params)?;
        let files = Files::new().with("file", params.file.clone());
        self.client
            .call(endpoints::UPLOAD_FILE, fields, files)
            .await
    }

    /// Retrieve a file's content
    ///
    /// By id this is a POST with an `id` field; by path it is a GET with the
    /// fields in the query string.
    #[instrument(skip(self, token, password))]
    pub async fn retrieve(
        &self,
        file: &FileRef,
        token: Option<&str>,
        password: Option<&str>,
    ) -> Result<Value> {
        let (endpoint, fields) = match file {
            FileRef::Id(id) => (endpoints::FILE_CONTENT_BY_ID, Fields::new().with("id", id)),
            FileRef::Path(path) => (endpoints::FILE_CONTENT, Fields::new().with("path", path)),
        };
        let fields = fields.with("token", token).with("password", password);

        self.client.call(endpoint, fields, Files::new()).await
    }

    /// Delete a file
    #[instrument(skip(self, token))]
    pub async fn delete(&self, file: &FileRef, token: Option<&str>) -> Result<Value> {
        let fields = Fields::from_serialize(file)?.with("token", token);
        self.client
            .call(endpoints::DELETE_FILE, fields, Files::new())
            .await
    }

    /// Change a file password
    #[instrument(skip_all, fields(file = ?params.file))]
    pub async fn update_password(&self, params: &UpdateFilePassword) -> Result<Value> {
        let fields = Fields::from_serialize(params)?;
        self.client
            .call(endpoints::UPDATE_FILE_PASSWORD, fields, Files::new())
            .await
    }

    /// Change file visibility
    #[instrument(skip_all, fields(file = ?params.file))]
    pub async fn update_privacy(&self, params: &UpdateFilePrivacy) -> Result<Value> {
        let fields = Fields::from_serialize(params)?;
        self.client
            .call(endpoints::UPDATE_FILE_PRIVACY, fields, Files::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_refs_flatten_to_wire_names() {
        let params = ListDirectory {
            directory: DirectoryRef::Id("dir_1".to_string()),
            token: None,
            directory_password: Some("pw".to_string()),
        };
        let fields = Fields::from_serialize(&params).expect("Params should encode");
        assert_eq!(
            fields.to_json(),
            json!({"directory_id": "dir_1", "directory_password": "pw"})
        );

        let fields =
            Fields::from_serialize(&FileRef::Path("docs/a.pdf".to_string())).expect("Encode ref");
        assert_eq!(fields.to_json(), json!({"path": "docs/a.pdf"}));
    }

    #[test]
    fn test_privacy_and_refresh_flags() {
        let params = UpdateFilePrivacy {
            file: FileRef::Id("f_9".to_string()),
            private: Privacy::Private,
            refresh_token: false,
        };
        let fields = Fields::from_serialize(&params).expect("Params should encode");
        assert_eq!(
            fields.to_json(),
            json!({"file_id": "f_9", "private": "yes", "refresh_token": "no"})
        );
    }

    #[test]
    fn test_upload_defaults_to_public_and_skips_file() {
        let params = UploadFile::new(b"abc".to_vec(), "docs");
        let fields = Fields::from_serialize(&params).expect("Params should encode");
        assert_eq!(fields.to_json(), json!({"path": "docs", "private": "no"}));
    }
}
