//! Rust client for the EagleBirth API.
//!
//! The API key prefix picks the environment: `eb_test_` keys talk to the
//! sandbox, `eb_live_` keys to production. Every operation goes through one
//! dispatcher, [`EagleBirth::dispatch`], which attaches credentials, encodes
//! fields as query string, JSON or multipart, and maps failures onto
//! [`Error`].
//!
//! ```no_run
//! use eaglebirth::{EagleBirth, SendEmail};
//!
//! # async fn example() -> eaglebirth::Result<()> {
//! let client = EagleBirth::new("eb_test_your_api_key")?;
//!
//! let mut email = SendEmail::new("ada@example.com", "Welcome", "Hello Ada");
//! email.salutation = Some("Hi".to_string());
//! let response = client.email().send(&email).await?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod resources;
mod response;

pub use self::client::{EagleBirth, EagleBirthBuilder, USER_AGENT_VALUE};
pub use self::config::{
    ApiKey, ClientConfig, Environment, DEFAULT_TIMEOUT, PRODUCTION_URL, SANDBOX_URL,
};
pub use self::error::{Error, ErrorKind, Result};
pub use self::request::{FieldValue, Fields, FileSource, Files, Method};
pub use self::resources::*;
