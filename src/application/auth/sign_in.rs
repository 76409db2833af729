use std::sync::Arc;

use crate::domain::auth::errors::ActionError;
use crate::domain::auth::ports::{AuthProvider, PageCache};
use crate::domain::auth::value_objects::Credentials;

use super::log_failure;
use super::navigation::{ActionOutcome, DASHBOARD_PATH, Redirect, SessionChange};

/// Use case for signing in with email and password
pub struct SignInUseCase {
  provider: Arc<dyn AuthProvider>,
  page_cache: Arc<dyn PageCache>,
}

impl SignInUseCase {
  /// Creates a new instance of SignInUseCase
  pub fn new(provider: Arc<dyn AuthProvider>, page_cache: Arc<dyn PageCache>) -> Self {
    Self {
      provider,
      page_cache,
    }
  }

  /// Executes the sign-in use case
  ///
  /// # Returns
  /// `ActionOutcome::Redirect` to the dashboard carrying the new session,
  /// or a completed failure with a message for the form.
  pub async fn execute(&self, email: &str, password: &str) -> ActionOutcome {
    match self.sign_in(email, password).await {
      Ok(redirect) => ActionOutcome::Redirect(redirect),
      Err(error) => {
        log_failure("sign_in", &error);
        error.into()
      }
    }
  }

  async fn sign_in(&self, email: &str, password: &str) -> Result<Redirect, ActionError> {
    let credentials = Credentials::parse(email, password)?;

    let session = self
      .provider
      .sign_in_with_password(&credentials)
      .await?
      .ok_or(ActionError::AuthenticationFailed)?;

    self.page_cache.revalidate_path(DASHBOARD_PATH).await?;

    tracing::info!(user_id = %session.user.id, "Sign-in successful");

    Ok(Redirect::to(DASHBOARD_PATH).with_session(SessionChange::Established(session)))
  }
}
