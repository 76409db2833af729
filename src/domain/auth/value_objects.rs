use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::ValidationError;

lazy_static! {
  // Deliberately loose: consecutive or trailing dots in the domain pass.
  static ref EMAIL_PATTERN: Regex =
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern must compile");
}

/// Returns true when `email` looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
  EMAIL_PATTERN.is_match(email)
}

/// Returns true when `password` is long enough to be sent to the provider
///
/// Length is measured in UTF-16 code units, the unit browsers use for
/// `minlength`, so a character outside the BMP counts twice.
pub fn is_valid_password(password: &str) -> bool {
  password.encode_utf16().count() >= Password::MIN_LENGTH
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after checking it against the address pattern
  ///
  /// The address is kept exactly as typed; the provider owns normalization.
  pub fn parse(email: impl Into<String>) -> Result<Self, ValidationError> {
    let email = email.into();

    if !is_valid_email(&email) {
      return Err(ValidationError::InvalidEmail);
    }

    Ok(Self(email))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  pub const MIN_LENGTH: usize = 6;

  /// Creates a new Password after the length check
  pub fn parse(password: impl Into<String>) -> Result<Self, ValidationError> {
    let password = password.into();

    if !is_valid_password(&password) {
      return Err(ValidationError::PasswordTooShort);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// Credentials
// ============================================================================

/// Validated email/password pair, built per request and never persisted
#[derive(Debug, Clone)]
pub struct Credentials {
  email: Email,
  password: Password,
}

impl Credentials {
  /// Validates raw form input
  ///
  /// Checks run in a fixed order so the first failing rule decides the
  /// message: both fields present, email shape, then password length.
  pub fn parse(email: &str, password: &str) -> Result<Self, ValidationError> {
    if email.is_empty() || password.is_empty() {
      return Err(ValidationError::MissingCredentials);
    }

    let email = Email::parse(email)?;
    let password = Password::parse(password)?;

    Ok(Self { email, password })
  }

  pub fn email(&self) -> &Email {
    &self.email
  }

  pub fn password(&self) -> &Password {
    &self.password
  }
}

// ============================================================================
// AccessToken Value Object (Provider-Issued Bearer Token)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
  /// Wraps a provider token; blank values are treated as no token at all
  pub fn new(token: impl Into<String>) -> Option<Self> {
    let token = token.into();
    if token.trim().is_empty() {
      None
    } else {
      Some(Self(token))
    }
  }

  /// Returns the token as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the token
impl fmt::Debug for AccessToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("AccessToken(***)")
  }
}
