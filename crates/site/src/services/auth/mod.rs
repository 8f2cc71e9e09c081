//! Authentication service client.
//!
//! Sign-in and session lookup are delegated to a hosted auth service that
//! speaks the Supabase (`GoTrue`) REST API:
//!
//! ```text
//! POST /auth/v1/token?grant_type=password  {email, password} -> {access_token, user}
//! GET  /auth/v1/user   (Authorization: Bearer <access_token>) -> user
//! ```
//!
//! The user's role lives in `user_metadata.role`; only `"admin"` grants
//! access to the admin pages.

mod error;

pub use error::AuthError;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;

use adopt_a_dog_core::{UserId, UserRole};

use crate::config::AuthServiceConfig;

/// A user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Auth-service user ID.
    pub id: UserId,
    /// Email address, if the service reports one.
    pub email: Option<String>,
    /// Role from user metadata.
    pub role: UserRole,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Bearer token for later `current_user` lookups.
    pub access_token: SecretString,
    /// The signed-in user.
    pub user: AuthUser,
}

/// Hosted authentication service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Look up the user owning an access token.
    ///
    /// Returns `Ok(None)` when the token is expired or revoked.
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError>;

    /// Exchange an email and password for a session.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: UserId,
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

impl From<UserResponse> for AuthUser {
    fn from(user: UserResponse) -> Self {
        let role = user
            .user_metadata
            .as_ref()
            .and_then(|m| m.role.as_deref());

        Self {
            id: user.id,
            email: user.email,
            role: UserRole::from_metadata(role),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: UserResponse,
}

// =============================================================================
// SupabaseAuthClient
// =============================================================================

/// Client for a Supabase-compatible auth service.
#[derive(Clone)]
pub struct SupabaseAuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseAuthClient {
    /// Create a new auth client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &AuthServiceConfig) -> Result<Self, AuthError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(config.anon_key.expose_secret())
                .map_err(|e| AuthError::Parse(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthClient {
    #[instrument(skip_all)]
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .bearer_auth(access_token)
            .send()
            .await?;
        let status = response.status();

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        Ok(Some(user.into()))
    }

    #[instrument(skip(self, password))]
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let body = serde_json::json!({
            "email": email.trim(),
            "password": password,
        });

        let response = self
            .client
            .post(self.endpoint("token?grant_type=password"))
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        // Supabase reports bad credentials as 400 invalid_grant
        if matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        Ok(AuthSession {
            access_token: SecretString::from(token.access_token),
            user: token.user.into(),
        })
    }
}
