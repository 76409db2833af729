use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::domain::auth::entities::{AuthSession, AuthUser};
use crate::domain::auth::errors::ProviderError;
use crate::domain::auth::ports::AuthProvider;
use crate::domain::auth::value_objects::{AccessToken, Credentials};
use crate::infrastructure::config::SupabaseConfig;

/// Access token lifetime assumed when the provider omits `expires_in`
const DEFAULT_EXPIRES_IN_SECONDS: i64 = 3600;

/// Fields checked, in order, for a human-readable message in error bodies
const ERROR_MESSAGE_FIELDS: [&str; 4] = ["msg", "error_description", "message", "error"];

/// Supabase Auth (GoTrue) client speaking the REST API directly
///
/// Every request carries the project's anon key in the `apikey` header.
/// Session state is never held here; callers pass the access token in.
#[derive(Clone)]
pub struct SupabaseAuthClient {
  http: Client,
  auth_url: String,
  anon_key: String,
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
  email: &'a str,
  password: &'a str,
}

impl<'a> From<&'a Credentials> for PasswordCredentials<'a> {
  fn from(credentials: &'a Credentials) -> Self {
    Self {
      email: credentials.email().as_str(),
      password: credentials.password().as_str(),
    }
  }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
  access_token: Option<String>,
  refresh_token: Option<String>,
  expires_in: Option<i64>,
  user: Option<AuthUser>,
}

impl SessionResponse {
  fn into_session(self) -> Option<AuthSession> {
    let access_token = self.access_token.and_then(AccessToken::new)?;
    let user = self.user?;

    Some(AuthSession::new(
      access_token,
      self.refresh_token,
      self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECONDS),
      user,
    ))
  }
}

impl SupabaseAuthClient {
  /// Create a new client
  ///
  /// # Arguments
  /// * `project_url` - Supabase project URL; `/auth/v1` is appended
  /// * `anon_key` - Project anon key
  /// * `request_timeout` - Upper bound for every provider call
  pub fn new(
    project_url: &str,
    anon_key: impl Into<String>,
    request_timeout: Duration,
  ) -> Result<Self, ProviderError> {
    let http = Client::builder()
      .timeout(request_timeout)
      .build()
      .map_err(|e| ProviderError::Transport(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self {
      http,
      auth_url: format!("{}/auth/v1", project_url.trim_end_matches('/')),
      anon_key: anon_key.into(),
    })
  }

  pub fn from_config(config: &SupabaseConfig) -> Result<Self, ProviderError> {
    Self::new(
      &config.url,
      config.anon_key.clone(),
      Duration::from_secs(config.request_timeout_seconds),
    )
  }

  fn endpoint(&self, path: &str) -> String {
    format!("{}/{}", self.auth_url, path)
  }

  async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ProviderError> {
    request
      .header("apikey", &self.anon_key)
      .send()
      .await
      .map_err(transport_error)
  }
}

fn transport_error(error: reqwest::Error) -> ProviderError {
  if error.is_timeout() {
    ProviderError::Transport("Auth provider request timed out".to_string())
  } else {
    ProviderError::Transport(format!("Auth provider unreachable: {}", error))
  }
}

/// Pull the provider's message out of an error body
fn provider_message(body: &str) -> Option<String> {
  let value: Value = serde_json::from_str(body).ok()?;

  ERROR_MESSAGE_FIELDS.iter().find_map(|field| {
    value
      .get(*field)
      .and_then(Value::as_str)
      .filter(|message| !message.is_empty())
      .map(str::to_string)
  })
}

async fn api_error(response: Response) -> ProviderError {
  let status = response.status();
  let body = response.text().await.unwrap_or_default();

  let message = provider_message(&body).unwrap_or_else(|| {
    status
      .canonical_reason()
      .unwrap_or("Auth provider error")
      .to_string()
  });

  ProviderError::Api {
    status: status.as_u16(),
    message,
  }
}

/// Statuses meaning the session behind the token no longer exists
fn is_session_gone(status: StatusCode) -> bool {
  matches!(
    status,
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
  )
}

#[async_trait]
impl AuthProvider for SupabaseAuthClient {
  async fn sign_in_with_password(
    &self,
    credentials: &Credentials,
  ) -> Result<Option<AuthSession>, ProviderError> {
    let response = self
      .send(
        self
          .http
          .post(self.endpoint("token"))
          .query(&[("grant_type", "password")])
          .json(&PasswordCredentials::from(credentials)),
      )
      .await?;

    if !response.status().is_success() {
      return Err(api_error(response).await);
    }

    let body: SessionResponse = response
      .json()
      .await
      .map_err(|e| ProviderError::Decode(format!("Invalid sign-in response: {}", e)))?;

    Ok(body.into_session())
  }

  async fn sign_up(
    &self,
    credentials: &Credentials,
    email_redirect_to: &str,
  ) -> Result<Option<AuthUser>, ProviderError> {
    let response = self
      .send(
        self
          .http
          .post(self.endpoint("signup"))
          .query(&[("redirect_to", email_redirect_to)])
          .json(&PasswordCredentials::from(credentials)),
      )
      .await?;

    if !response.status().is_success() {
      return Err(api_error(response).await);
    }

    let body: Value = response
      .json()
      .await
      .map_err(|e| ProviderError::Decode(format!("Invalid sign-up response: {}", e)))?;

    // With email confirmation on, the user comes back bare; otherwise it is
    // wrapped in a session.
    let user = body.get("user").cloned().unwrap_or(body);
    Ok(serde_json::from_value(user).ok())
  }

  async fn sign_out(&self, access_token: Option<&AccessToken>) -> Result<(), ProviderError> {
    let Some(token) = access_token else {
      tracing::debug!("Sign-out without a session, nothing to revoke");
      return Ok(());
    };

    let response = self
      .send(
        self
          .http
          .post(self.endpoint("logout"))
          .query(&[("scope", "global")])
          .bearer_auth(token.as_str()),
      )
      .await?;

    let status = response.status();
    if status.is_success() {
      return Ok(());
    }
    if is_session_gone(status) {
      tracing::debug!(status = status.as_u16(), "Session already gone at provider");
      return Ok(());
    }

    Err(api_error(response).await)
  }

  async fn get_user(&self, access_token: &AccessToken) -> Result<Option<AuthUser>, ProviderError> {
    let response = self
      .send(
        self
          .http
          .get(self.endpoint("user"))
          .bearer_auth(access_token.as_str()),
      )
      .await?;

    let status = response.status();
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
      return Ok(None);
    }
    if !status.is_success() {
      return Err(api_error(response).await);
    }

    let user = response
      .json()
      .await
      .map_err(|e| ProviderError::Decode(format!("Invalid user response: {}", e)))?;

    Ok(Some(user))
  }
}
