use serde::Serialize;
use std::sync::Arc;

use crate::domain::auth::errors::ActionError;
use crate::domain::auth::ports::AuthProvider;
use crate::domain::auth::value_objects::Credentials;

use super::action_result::ActionResult;
use super::log_failure;

/// Route the confirmation email links back to
pub const EMAIL_CALLBACK_PATH: &str = "/auth/callback";

pub const SIGN_UP_CONFIRMATION_MESSAGE: &str = "Check your email to confirm your account!";

/// Payload returned after a successful registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpConfirmation {
  pub message: String,
}

/// Use case for registering a new account
///
/// Registration never signs the user in: the provider sends a confirmation
/// email and the user continues from the link.
pub struct SignUpUseCase {
  provider: Arc<dyn AuthProvider>,
  public_app_url: Option<String>,
}

impl SignUpUseCase {
  /// Creates a new instance of SignUpUseCase
  ///
  /// # Arguments
  /// * `provider` - Hosted auth provider
  /// * `public_app_url` - Public base URL of this app, used for the confirmation link
  pub fn new(provider: Arc<dyn AuthProvider>, public_app_url: Option<String>) -> Self {
    Self {
      provider,
      public_app_url,
    }
  }

  /// Executes the sign-up use case
  pub async fn execute(&self, email: &str, password: &str) -> ActionResult<SignUpConfirmation> {
    match self.sign_up(email, password).await {
      Ok(confirmation) => ActionResult::with_data(confirmation),
      Err(error) => {
        log_failure("sign_up", &error);
        error.into()
      }
    }
  }

  async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpConfirmation, ActionError> {
    let credentials = Credentials::parse(email, password)?;
    let email_redirect_to = self.email_redirect_to()?;

    let user = self
      .provider
      .sign_up(&credentials, &email_redirect_to)
      .await?;

    tracing::info!(
      user_id = ?user.as_ref().map(|u| u.id),
      "Sign-up accepted, confirmation email pending"
    );

    Ok(SignUpConfirmation {
      message: SIGN_UP_CONFIRMATION_MESSAGE.to_string(),
    })
  }

  fn email_redirect_to(&self) -> Result<String, ActionError> {
    let base = self
      .public_app_url
      .as_deref()
      .map(str::trim)
      .filter(|url| !url.is_empty())
      .ok_or(ActionError::Configuration)?;

    let base = base.strip_suffix('/').unwrap_or(base);
    Ok(format!("{}{}", base, EMAIL_CALLBACK_PATH))
  }
}
