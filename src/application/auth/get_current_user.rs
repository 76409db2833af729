use std::sync::Arc;

use crate::domain::auth::entities::AuthUser;
use crate::domain::auth::ports::AuthProvider;
use crate::domain::auth::value_objects::AccessToken;

/// Use case for resolving the signed-in user from a session cookie
pub struct GetCurrentUserUseCase {
  provider: Arc<dyn AuthProvider>,
}

impl GetCurrentUserUseCase {
  /// Creates a new instance of GetCurrentUserUseCase
  pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
    Self { provider }
  }

  /// Executes the get current user use case
  ///
  /// Any failure to resolve the user counts as signed out; provider
  /// outages are logged.
  pub async fn execute(&self, access_token: Option<&AccessToken>) -> Option<AuthUser> {
    let token = access_token?;

    match self.provider.get_user(token).await {
      Ok(user) => user,
      Err(e) => {
        tracing::warn!(error = %e, "Could not resolve current user, treating as signed out");
        None
      }
    }
  }
}
