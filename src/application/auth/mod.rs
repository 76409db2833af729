//! Authentication actions
//!
//! Each action validates form input, delegates to the hosted auth provider
//! and hands back either a result for the form or a redirect for the HTTP
//! layer to perform.

mod action_result;
mod get_current_user;
mod navigation;
mod sign_in;
mod sign_out;
mod sign_up;

#[cfg(test)]
pub(crate) mod test_support;

pub use action_result::ActionResult;
pub use get_current_user::GetCurrentUserUseCase;
pub use navigation::{
  ActionOutcome, DASHBOARD_PATH, LOGIN_PATH, ROOT_PATH, Redirect, SessionChange,
};
pub use sign_in::SignInUseCase;
pub use sign_out::SignOutUseCase;
pub use sign_up::{
  EMAIL_CALLBACK_PATH, SIGN_UP_CONFIRMATION_MESSAGE, SignUpConfirmation, SignUpUseCase,
};

use crate::domain::auth::errors::ActionError;

fn log_failure(action: &'static str, error: &ActionError) {
  match error {
    ActionError::Validation(e) => tracing::debug!(action, error = %e, "Rejected form input"),
    ActionError::Provider(e) => {
      tracing::warn!(action, status = ?e.status(), error = %e, "Auth provider refused request")
    }
    ActionError::AuthenticationFailed => {
      tracing::warn!(action, "Auth provider returned no user")
    }
    ActionError::Configuration => {
      tracing::error!(action, "Public application URL is not configured")
    }
    ActionError::Unexpected(_) => tracing::error!(action, error = %error, "Auth action failed"),
  }
}
