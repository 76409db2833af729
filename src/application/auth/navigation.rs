use crate::domain::auth::entities::AuthSession;
use crate::domain::auth::errors::ActionError;

use super::action_result::ActionResult;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// What the caller must do with the session cookie while navigating
#[derive(Debug, Clone)]
pub enum SessionChange {
  Unchanged,
  Established(AuthSession),
  Cleared,
}

/// Request to move the client to another route
///
/// Actions hand this back to the HTTP layer, which performs the
/// navigation and applies the session change.
#[derive(Debug, Clone)]
pub struct Redirect {
  location: String,
  session: SessionChange,
}

impl Redirect {
  pub fn to(location: impl Into<String>) -> Self {
    Self {
      location: location.into(),
      session: SessionChange::Unchanged,
    }
  }

  pub fn with_session(mut self, session: SessionChange) -> Self {
    self.session = session;
    self
  }

  pub fn location(&self) -> &str {
    &self.location
  }

  pub fn session(&self) -> &SessionChange {
    &self.session
  }

  pub fn into_parts(self) -> (String, SessionChange) {
    (self.location, self.session)
  }
}

/// Result of an action that may end in navigation
#[derive(Debug, Clone)]
pub enum ActionOutcome<T = ()> {
  /// The action finished and the caller renders the result
  Completed(ActionResult<T>),
  /// The action finished by asking for navigation; never an error
  Redirect(Redirect),
}

impl<T> ActionOutcome<T> {
  /// True only when the action asked for navigation
  pub fn is_redirect(&self) -> bool {
    matches!(self, ActionOutcome::Redirect(_))
  }

  pub fn redirect(&self) -> Option<&Redirect> {
    match self {
      ActionOutcome::Redirect(redirect) => Some(redirect),
      ActionOutcome::Completed(_) => None,
    }
  }

  pub fn result(&self) -> Option<&ActionResult<T>> {
    match self {
      ActionOutcome::Completed(result) => Some(result),
      ActionOutcome::Redirect(_) => None,
    }
  }
}

impl<T> From<ActionError> for ActionOutcome<T> {
  fn from(error: ActionError) -> Self {
    ActionOutcome::Completed(error.into())
  }
}

impl<T> From<Redirect> for ActionOutcome<T> {
  fn from(redirect: Redirect) -> Self {
    ActionOutcome::Redirect(redirect)
  }
}
