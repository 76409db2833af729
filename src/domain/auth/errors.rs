use thiserror::Error;

/// Input validation errors
///
/// The messages are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Email and password are required")]
  MissingCredentials,

  #[error("Invalid email format")]
  InvalidEmail,

  #[error("Password must be at least 6 characters")]
  PasswordTooShort,
}

/// Errors raised while talking to the hosted auth provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
  /// The provider answered and rejected the request
  #[error("{message}")]
  Api { status: u16, message: String },

  /// The request never produced a response
  #[error("{0}")]
  Transport(String),

  /// The provider answered with a body we could not read
  #[error("{0}")]
  Decode(String),
}

impl ProviderError {
  /// HTTP status returned by the provider, if it answered at all
  pub fn status(&self) -> Option<u16> {
    match self {
      ProviderError::Api { status, .. } => Some(*status),
      _ => None,
    }
  }
}

/// Page cache errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
  #[error("Page cache unavailable: {0}")]
  Unavailable(String),
}

/// Every way an auth action can fail
///
/// All variants surface to the caller as a plain message through `Display`.
#[derive(Debug, Error)]
pub enum ActionError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Provider(#[from] ProviderError),

  #[error("Authentication failed")]
  AuthenticationFailed,

  #[error("Server configuration error")]
  Configuration,

  #[error("{}", unexpected_message(.0))]
  Unexpected(Option<String>),
}

fn unexpected_message(message: &Option<String>) -> &str {
  message
    .as_deref()
    .filter(|m| !m.is_empty())
    .unwrap_or("An unexpected error occurred")
}

impl From<CacheError> for ActionError {
  fn from(error: CacheError) -> Self {
    ActionError::Unexpected(Some(error.to_string()))
  }
}
