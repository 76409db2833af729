use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{AuthSession, AuthUser};
use super::errors::{CacheError, ProviderError};
use super::value_objects::{AccessToken, Credentials};

/// Hosted identity provider
///
/// Implementations own credential verification and session issuance.
#[async_trait]
pub trait AuthProvider: Send + Sync {
  /// Signs in with email and password
  ///
  /// Returns `Ok(None)` when the provider accepted the request but
  /// reported no user.
  async fn sign_in_with_password(
    &self,
    credentials: &Credentials,
  ) -> Result<Option<AuthSession>, ProviderError>;

  /// Registers a new account; the provider emails a confirmation link
  /// pointing at `email_redirect_to`
  async fn sign_up(
    &self,
    credentials: &Credentials,
    email_redirect_to: &str,
  ) -> Result<Option<AuthUser>, ProviderError>;

  /// Ends the session behind `access_token`; no token is not an error
  async fn sign_out(&self, access_token: Option<&AccessToken>) -> Result<(), ProviderError>;

  /// Resolves the user behind `access_token`, `Ok(None)` if the token is
  /// no longer valid
  async fn get_user(&self, access_token: &AccessToken) -> Result<Option<AuthUser>, ProviderError>;
}

/// Cache of rendered pages, keyed by route path and user
#[async_trait]
pub trait PageCache: Send + Sync {
  async fn get(&self, path: &str, user_id: Uuid) -> Result<Option<String>, CacheError>;

  async fn put(&self, path: &str, user_id: Uuid, html: String) -> Result<(), CacheError>;

  /// Marks `path` and everything nested under it as stale
  ///
  /// Returns the number of dropped entries.
  async fn revalidate_path(&self, path: &str) -> Result<usize, CacheError>;
}
