use std::sync::Arc;

use crate::domain::auth::errors::ActionError;
use crate::domain::auth::ports::{AuthProvider, PageCache};
use crate::domain::auth::value_objects::AccessToken;

use super::log_failure;
use super::navigation::{ActionOutcome, LOGIN_PATH, ROOT_PATH, Redirect, SessionChange};

/// Use case for signing out the current session
pub struct SignOutUseCase {
  provider: Arc<dyn AuthProvider>,
  page_cache: Arc<dyn PageCache>,
}

impl SignOutUseCase {
  /// Creates a new instance of SignOutUseCase
  pub fn new(provider: Arc<dyn AuthProvider>, page_cache: Arc<dyn PageCache>) -> Self {
    Self {
      provider,
      page_cache,
    }
  }

  /// Executes the sign-out use case
  ///
  /// On success every cached page is revalidated and the caller is sent to
  /// the login route with the session cookie cleared.
  pub async fn execute(&self, access_token: Option<&AccessToken>) -> ActionOutcome {
    match self.sign_out(access_token).await {
      Ok(redirect) => ActionOutcome::Redirect(redirect),
      Err(error) => {
        log_failure("sign_out", &error);
        error.into()
      }
    }
  }

  /// Sign-out for plain form submissions
  ///
  /// Runs the same logic but keeps only the navigation; a failure is logged
  /// and dropped.
  pub async fn execute_form(&self, access_token: Option<&AccessToken>) -> Option<Redirect> {
    match self.execute(access_token).await {
      ActionOutcome::Redirect(redirect) => Some(redirect),
      ActionOutcome::Completed(result) => {
        tracing::warn!(
          error = result.error().unwrap_or_default(),
          "Sign-out form submission did not navigate"
        );
        None
      }
    }
  }

  async fn sign_out(&self, access_token: Option<&AccessToken>) -> Result<Redirect, ActionError> {
    self.provider.sign_out(access_token).await?;

    self.page_cache.revalidate_path(ROOT_PATH).await?;

    tracing::info!("Sign-out successful");

    Ok(Redirect::to(LOGIN_PATH).with_session(SessionChange::Cleared))
  }
}
