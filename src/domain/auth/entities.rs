use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::value_objects::AccessToken;

/// User as reported by the auth provider
///
/// The provider owns the full record; this app only reads the id and email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
  /// Provider-assigned identifier
  pub id: Uuid,
  /// Email address, absent for phone-only accounts
  #[serde(default)]
  pub email: Option<String>,
}

impl AuthUser {
  pub fn new(id: Uuid, email: Option<String>) -> Self {
    Self { id, email }
  }

  /// Email to show in the UI, empty when the provider has none
  pub fn display_email(&self) -> &str {
    self.email.as_deref().unwrap_or_default()
  }
}

/// Session issued by the provider after a successful password sign-in
#[derive(Clone)]
pub struct AuthSession {
  pub access_token: AccessToken,
  pub refresh_token: Option<String>,
  /// Lifetime of the access token in seconds
  pub expires_in: i64,
  pub expires_at: DateTime<Utc>,
  pub user: AuthUser,
}

impl AuthSession {
  /// Creates a session that expires `expires_in` seconds from now
  pub fn new(
    access_token: AccessToken,
    refresh_token: Option<String>,
    expires_in: i64,
    user: AuthUser,
  ) -> Self {
    Self {
      access_token,
      refresh_token,
      expires_in,
      expires_at: Utc::now() + Duration::seconds(expires_in),
      user,
    }
  }

  /// Whole seconds until the access token expires, rounded up; zero once
  /// it has
  pub fn seconds_remaining(&self) -> i64 {
    let millis = (self.expires_at - Utc::now()).num_milliseconds();
    (millis + 999).div_euclid(1000).max(0)
  }
}

impl fmt::Debug for AuthSession {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AuthSession")
      .field("access_token", &self.access_token)
      .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
      .field("expires_in", &self.expires_in)
      .field("expires_at", &self.expires_at)
      .field("user", &self.user)
      .finish()
  }
}
