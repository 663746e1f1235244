//! Request descriptors: verb, form fields and file attachments
//!
//! [`Fields`] is an open key/value map. Entries holding [`FieldValue::Null`]
//! are kept in the map but are never sent: every encoding in this module
//! (JSON body, query string, multipart) goes through [`Fields::iter`], which
//! skips them. Callers can therefore insert optional parameters verbatim.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// HTTP verbs used by the EagleBirth API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Fields go in the query string
    Get,
    /// Fields go in a JSON body
    Post,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent value, pruned before send
    Null,
    /// Text
    Text(String),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Whether this value is pruned before send
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// String form used in query strings and multipart text parts
    ///
    /// Bytes are base64 encoded; `Null` has no text form.
    fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Bytes(bytes) => Some(STANDARD.encode(bytes)),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Int(n) => Value::from(*n),
            Self::Float(n) => Value::from(*n),
            Self::Bool(b) => Value::Bool(*b),
            Self::Bytes(bytes) => Value::String(STANDARD.encode(bytes)),
        }
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Form fields of a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    inner: BTreeMap<String, FieldValue>,
}

impl Fields {
    /// Empty field map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a field map from any value that serializes to a JSON object
    ///
    /// Struct field names become keys as-is, so parameter structs declare
    /// their wire names directly. `None` fields become `Null` and are pruned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generic`] if `params` does not serialize to an object
    pub fn from_serialize<T: Serialize + ?Sized>(params: &T) -> Result<Self> {
        let value = serde_json::to_value(params)
            .map_err(|e| Error::generic("Could not encode request fields", e))?;

        match value {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from_json(value)))
                .collect()),
            Value::Null => Ok(Self::new()),
            other => Err(Error::Generic {
                message: format!("Request fields must be an object, got {other}"),
                source: None,
            }),
        }
    }

    /// Insert a field, replacing any previous value under `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Builder-style [`Fields::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert `value` unless `key` already holds a non-null value
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let slot = self.inner.entry(key.into()).or_insert(FieldValue::Null);
        if slot.is_null() {
            *slot = value.into();
        }
    }

    /// Remove and return the value under `key`
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.inner.remove(key)
    }

    /// Value under `key`, including `Null`
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.inner.get(key)
    }

    /// Entries that will be sent, i.e. all non-null entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.inner
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries that will be sent
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no entry will be sent
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_json()))
            .collect();
        Value::Object(map)
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        self.iter()
            .filter_map(|(key, value)| value.to_text().map(|text| (key.to_string(), text)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

/// Source of an uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// File on disk, read at dispatch time
    Path(PathBuf),
    /// In-memory buffer
    Bytes(Vec<u8>),
}

impl FileSource {
    /// File on disk
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// In-memory buffer
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    async fn into_part(self, key: &str) -> Result<Part> {
        match self {
            Self::Bytes(bytes) => Ok(Part::bytes(bytes).file_name(key.to_string())),
            Self::Path(path) => {
                let bytes = read_upload(&path).await?;
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| key.to_string());
                Ok(Part::bytes(bytes).file_name(file_name))
            }
        }
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for FileSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for FileSource {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

/// Read a file for upload, reporting any failure as a validation error
async fn read_upload(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::validation(format!("File not found: {}", path.display()))
        } else {
            Error::validation(format!("Could not read file {}: {err}", path.display()))
        }
    })
}

/// File attachments of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Files {
    inner: BTreeMap<String, FileSource>,
}

impl Files {
    /// No attachments
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a file under `key`
    pub fn insert(&mut self, key: impl Into<String>, source: impl Into<FileSource>) {
        self.inner.insert(key.into(), source.into());
    }

    /// Builder-style [`Files::insert`]
    pub fn with(mut self, key: impl Into<String>, source: impl Into<FileSource>) -> Self {
        self.insert(key, source);
        self
    }

    /// Attachments by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileSource)> {
        self.inner.iter().map(|(key, source)| (key.as_str(), source))
    }

    /// Number of attachments
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether there are no attachments
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Encode fields and files as a multipart form
///
/// All path files are read before the form is returned, so a missing file
/// fails here, before anything touches the network.
pub(crate) async fn multipart_form(fields: &Fields, files: Files) -> Result<Form> {
    let mut form = Form::new();

    for (key, value) in fields.iter() {
        form = match value {
            FieldValue::Bytes(bytes) => form.part(key.to_string(), Part::bytes(bytes.clone())),
            other => match other.to_text() {
                Some(text) => form.text(key.to_string(), text),
                None => form,
            },
        };
    }

    for (key, source) in files.inner {
        let part = source.into_part(&key).await?;
        form = form.part(key, part);
    }

    Ok(form)
}
