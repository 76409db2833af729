use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::domain::auth::errors::ActionError;

/// Uniform response of every auth action
///
/// Serializes as `{"success": true, "data": ...}` (`data` omitted when
/// there is no payload) or `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult<T = ()> {
  Success { data: Option<T> },
  Failure { error: String },
}

impl<T> ActionResult<T> {
  /// Success without a payload
  pub fn ok() -> Self {
    ActionResult::Success { data: None }
  }

  /// Success carrying `data`
  pub fn with_data(data: T) -> Self {
    ActionResult::Success { data: Some(data) }
  }

  pub fn failure(error: impl Into<String>) -> Self {
    ActionResult::Failure {
      error: error.into(),
    }
  }

  pub fn is_success(&self) -> bool {
    matches!(self, ActionResult::Success { .. })
  }

  /// Failure message, `None` on success
  pub fn error(&self) -> Option<&str> {
    match self {
      ActionResult::Failure { error } => Some(error),
      ActionResult::Success { .. } => None,
    }
  }

  /// Success payload, `None` on failure or when the action has none
  pub fn data(&self) -> Option<&T> {
    match self {
      ActionResult::Success { data } => data.as_ref(),
      ActionResult::Failure { .. } => None,
    }
  }
}

impl<T> From<ActionError> for ActionResult<T> {
  fn from(error: ActionError) -> Self {
    ActionResult::failure(error.to_string())
  }
}

impl<T: Serialize> Serialize for ActionResult<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      ActionResult::Success { data: Some(data) } => {
        let mut state = serializer.serialize_struct("ActionResult", 2)?;
        state.serialize_field("success", &true)?;
        state.serialize_field("data", data)?;
        state.end()
      }
      ActionResult::Success { data: None } => {
        let mut state = serializer.serialize_struct("ActionResult", 1)?;
        state.serialize_field("success", &true)?;
        state.end()
      }
      ActionResult::Failure { error } => {
        let mut state = serializer.serialize_struct("ActionResult", 2)?;
        state.serialize_field("success", &false)?;
        state.serialize_field("error", error)?;
        state.end()
      }
    }
  }
}
