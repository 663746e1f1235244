//! App user management

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::{endpoints, Endpoint};
use crate::client::EagleBirth;
use crate::error::Result;
use crate::request::{Fields, Files};

/// User addressed by username or by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UserRef {
    /// Username
    #[serde(rename = "username")]
    Username(String),
    /// User id
    #[serde(rename = "user_id")]
    Id(String),
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Can sign in
    Active,
    /// Blocked by an admin
    Suspended,
    /// Awaiting verification
    Pending,
    /// Soft deleted
    Deleted,
}

/// User to create
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateUser {
    /// Email address
    pub email: Option<String>,
    /// Username
    pub username: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// Middle name
    pub middle_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Birth date
    pub birth: Option<String>,
    /// Initial password
    pub password: Option<String>,
    /// Referring user
    pub referer_id: Option<String>,
    /// External identity provider, e.g. `google`
    pub authentication_type: Option<String>,
    /// Id at the external identity provider
    pub authentication_type_id: Option<String>,
}

/// User lookup, also used by [`Users::exists`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetUser {
    /// Username
    pub username: Option<String>,
    /// User id
    pub user_id: Option<String>,
    /// External identity provider
    pub authentication_type: Option<String>,
    /// Id at the external identity provider
    pub authentication_type_id: Option<String>,
}

impl From<UserRef> for GetUser {
    fn from(user: UserRef) -> Self {
        match user {
            UserRef::Username(username) => Self {
                username: Some(username),
                ..Default::default()
            },
            UserRef::Id(user_id) => Self {
                user_id: Some(user_id),
                ..Default::default()
            },
        }
    }
}

/// User listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListUsers {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
}

impl UserStatus {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Pending => "pending",
            Self::Deleted => "deleted",
        }
    }
}

impl Default for ListUsers {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// Profile update; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUser {
    /// Username of the user to update
    pub username: Option<String>,
    /// Id of the user to update
    pub user_id: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// Middle name
    pub middle_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Birth date
    pub birth: Option<String>,
    /// Referring user
    pub referer_id: Option<String>,
    /// External identity provider
    pub authentication_type: Option<String>,
    /// Id at the external identity provider
    pub authentication_type_id: Option<String>,
}

/// Sign-in credentials
///
/// Password sign-in sets `username` and `password`; external providers set
/// the `authentication_type*` pair; the PKCE flow sets `code` and
/// `code_verifier`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignInUser {
    /// Username
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
    /// External identity provider
    pub authentication_type: Option<String>,
    /// Id at the external identity provider
    pub authentication_type_id: Option<String>,
    /// Authorization code
    pub code: Option<String>,
    /// PKCE code verifier
    pub code_verifier: Option<String>,
}

/// Self-service password reset
#[derive(Debug, Clone, Serialize)]
pub struct ResetPassword {
    /// Code received by the user
    pub code: String,
    /// Id returned when the code was sent
    pub code_id: String,
    /// New password
    pub password: String,
}

/// User management resource
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a EagleBirth,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a EagleBirth) -> Self {
        Self { client }
    }

    async fn post<T: Serialize + ?Sized>(&self, endpoint: Endpoint, params: &T) -> Result<Value> {
        let fields = Fields::from_serialize(params)?;
        self.client.call(endpoint, fields, Files::new()).await
    }

    async fn post_for_user(
        &self,
        endpoint: Endpoint,
        user: &UserRef,
        mut fields: Fields,
    ) -> Result<Value> {
        for (key, value) in Fields::from_serialize(user)?.iter() {
            fields.insert(key, value.clone());
        }
        self.client.call(endpoint, fields, Files::new()).await
    }

    /// Create a user
    #[instrument(skip_all)]
    pub async fn create(&self, params: &CreateUser) -> Result<Value> {
        self.post(endpoints::CREATE_USER, params).await
    }

    /// Get one user
    #[instrument(skip(self))]
    pub async fn get(&self, params: &GetUser) -> Result<Value> {
        self.post(endpoints::GET_USER, params).await
    }

    /// List users, one page at a time
    #[instrument(skip(self))]
    pub async fn list(&self, page: ListUsers) -> Result<Value> {
        self.post(endpoints::LIST_USERS, &page).await
    }

    /// Update a user's profile
    #[instrument(skip_all)]
    pub async fn update(&self, params: &UpdateUser) -> Result<Value> {
        self.post(endpoints::UPDATE_USER, params).await
    }

    /// Delete a user
    #[instrument(skip(self))]
    pub async fn delete(&self, user: &UserRef) -> Result<Value> {
        self.post(endpoints::DELETE_USER, user).await
    }

    /// Whether a user exists
    #[instrument(skip(self))]
    pub async fn exists(&self, params: &GetUser) -> Result<Value> {
        self.post(endpoints::USER_EXISTS, params).await
    }

    /// Sign a user in; the response carries access and refresh tokens
    #[instrument(skip_all)]
    pub async fn sign_in(&self, params: &SignInUser) -> Result<Value> {
        self.post(endpoints::SIGN_IN, params).await
    }

    /// Sign a user out, invalidating `refresh_token`
    #[instrument(skip_all)]
    pub async fn sign_out(&self, refresh_token: &str) -> Result<Value> {
        let fields = Fields::new().with("refresh_token", refresh_token);
        self.client
            .call(endpoints::SIGN_OUT, fields, Files::new())
            .await
    }

    /// Exchange a refresh token for a new session token
    #[instrument(skip_all)]
    pub async fn refresh_token(&self, refresh: &str) -> Result<Value> {
        let fields = Fields::new().with("refresh", refresh);
        self.client
            .call(endpoints::REFRESH_TOKEN, fields, Files::new())
            .await
    }

    /// Check a session token
    #[instrument(skip_all)]
    pub async fn verify_token(&self, token: &str) -> Result<Value> {
        let fields = Fields::new().with("token", token);
        self.client
            .call(endpoints::VERIFY_TOKEN, fields, Files::new())
            .await
    }

    /// Set a user's password (admin action)
    #[instrument(skip(self, password))]
    pub async fn update_password(&self, user: &UserRef, password: &str) -> Result<Value> {
        let fields = Fields::new().with("password", password);
        self.post_for_user(endpoints::UPDATE_USER_PASSWORD, user, fields)
            .await
    }

    /// Reset a password with an emailed code (self-service)
    #[instrument(skip_all)]
    pub async fn reset_password(&self, params: &ResetPassword) -> Result<Value> {
        self.post(endpoints::RESET_PASSWORD, params).await
    }

    /// Change a user's status
    #[instrument(skip(self))]
    pub async fn update_status(&self, user: &UserRef, status: UserStatus) -> Result<Value> {
        let fields = Fields::new().with("status", status.as_str());
        self.post_for_user(endpoints::UPDATE_USER_STATUS, user, fields)
            .await
    }

    /// Change a user's type or role
    #[instrument(skip(self))]
    pub async fn update_type(&self, user: &UserRef, user_type: &str) -> Result<Value> {
        let fields = Fields::new().with("type", user_type);
        self.post_for_user(endpoints::UPDATE_USER_TYPE, user, fields)
            .await
    }

    /// Reactivate a deactivated user
    #[instrument(skip(self))]
    pub async fn reactivate(&self, user: &UserRef) -> Result<Value> {
        self.post(endpoints::REACTIVATE_USER, user).await
    }

    /// Email a verification code to a user
    #[instrument(skip(self))]
    pub async fn send_verification_code(&self, user: &UserRef) -> Result<Value> {
        self.post(endpoints::SEND_VERIFICATION_CODE, user).await
    }

    /// Validate an emailed verification code
    #[instrument(skip(self, code))]
    pub async fn validate_verification_code(&self, code_id: &str, code: &str) -> Result<Value> {
        let fields = Fields::new().with("code", code).with("code_id", code_id);
        self.client
            .call(endpoints::VALIDATE_VERIFICATION_CODE, fields, Files::new())
            .await
    }

    /// Exchange an authorization code from the hosted sign-in page for a
    /// user session (PKCE)
    #[instrument(skip_all)]
    pub async fn exchange_code_for_user(&self, code: &str, code_verifier: &str) -> Result<Value> {
        let fields = Fields::new()
            .with("code", code)
            .with("code_verifier", code_verifier);
        self.client
            .call(endpoints::SIGN_IN, fields, Files::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_ref_wire_names() {
        let fields =
            Fields::from_serialize(&UserRef::Username("ada".to_string())).expect("Encode ref");
        assert_eq!(fields.to_json(), json!({"username": "ada"}));

        let fields = Fields::from_serialize(&UserRef::Id("u_1".to_string())).expect("Encode ref");
        assert_eq!(fields.to_json(), json!({"user_id": "u_1"}));
    }

    #[test]
    fn test_list_defaults() {
        let fields = Fields::from_serialize(&ListUsers::default()).expect("Encode page");
        assert_eq!(fields.to_json(), json!({"page": 1, "limit": 20}));
    }

    #[test]
    fn test_unset_fields_are_pruned() {
        let params = CreateUser {
            email: Some("ada@example.com".to_string()),
            password: Some("hunter2".to_string()),
            ..Default::default()
        };
        let fields = Fields::from_serialize(&params).expect("Encode user");
        assert_eq!(
            fields.to_json(),
            json!({"email": "ada@example.com", "password": "hunter2"})
        );
    }

    #[test]
    fn test_get_user_from_ref() {
        let lookup = GetUser::from(UserRef::Id("u_7".to_string()));
        assert_eq!(lookup.user_id.as_deref(), Some("u_7"));
        assert!(lookup.username.is_none());
    }

    #[test]
    fn test_status_wire_value_matches_serde() {
        for status in [
            UserStatus::Active,
            UserStatus::Suspended,
            UserStatus::Pending,
            UserStatus::Deleted,
        ] {
            assert_eq!(
                serde_json::to_value(status).expect("Encode status"),
                json!(status.as_str())
            );
        }
    }

    #[test]
    fn test_status_is_lowercase() {
        assert_eq!(
            serde_json::to_value(UserStatus::Suspended).expect("Encode status"),
            json!("suspended")
        );
    }
}
