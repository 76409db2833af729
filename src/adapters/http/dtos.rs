use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Email/password submission, shared by the HTML forms and the JSON API
///
/// Missing fields deserialize as empty strings so the action reports them
/// with its own message instead of failing extraction.
#[derive(Clone, Default, Deserialize)]
pub struct CredentialsForm {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CredentialsForm")
      .field("email", &self.email)
      .field("password", &"***")
      .finish()
  }
}

/// Document submitted for chunking
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkDocumentRequest {
  pub text: String,
  /// Copied onto every chunk
  #[serde(default)]
  pub metadata: Map<String, Value>,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,
}
