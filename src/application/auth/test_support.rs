//! Hand-written port fakes shared by the use case tests

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::auth::{
  AccessToken, AuthProvider, AuthSession, AuthUser, CacheError, Credentials, PageCache,
  ProviderError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
  SignIn { email: String },
  SignUp { email: String, redirect_to: String },
  SignOut { with_token: bool },
  GetUser,
}

pub fn sample_user() -> AuthUser {
  AuthUser::new(Uuid::new_v4(), Some("user@example.com".to_string()))
}

pub fn sample_session() -> AuthSession {
  AuthSession::new(
    AccessToken::new("access-token").unwrap(),
    Some("refresh-token".to_string()),
    3600,
    sample_user(),
  )
}

pub fn rejected(message: &str) -> ProviderError {
  ProviderError::Api {
    status: 400,
    message: message.to_string(),
  }
}

pub struct FakeAuthProvider {
  sign_in: Result<Option<AuthSession>, ProviderError>,
  sign_up: Result<Option<AuthUser>, ProviderError>,
  sign_out: Result<(), ProviderError>,
  get_user: Result<Option<AuthUser>, ProviderError>,
  calls: Mutex<Vec<ProviderCall>>,
}

impl Default for FakeAuthProvider {
  fn default() -> Self {
    Self {
      sign_in: Ok(Some(sample_session())),
      sign_up: Ok(Some(sample_user())),
      sign_out: Ok(()),
      get_user: Ok(Some(sample_user())),
      calls: Mutex::new(Vec::new()),
    }
  }
}

impl FakeAuthProvider {
  pub fn with_sign_in(mut self, result: Result<Option<AuthSession>, ProviderError>) -> Self {
    self.sign_in = result;
    self
  }

  pub fn with_sign_up(mut self, result: Result<Option<AuthUser>, ProviderError>) -> Self {
    self.sign_up = result;
    self
  }

  pub fn with_sign_out(mut self, result: Result<(), ProviderError>) -> Self {
    self.sign_out = result;
    self
  }

  pub fn with_user(mut self, result: Result<Option<AuthUser>, ProviderError>) -> Self {
    self.get_user = result;
    self
  }

  pub fn calls(&self) -> Vec<ProviderCall> {
    self.calls.lock().clone()
  }

  fn record(&self, call: ProviderCall) {
    self.calls.lock().push(call);
  }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
  async fn sign_in_with_password(
    &self,
    credentials: &Credentials,
  ) -> Result<Option<AuthSession>, ProviderError> {
    self.record(ProviderCall::SignIn {
      email: credentials.email().to_string(),
    });
    self.sign_in.clone()
  }

  async fn sign_up(
    &self,
    credentials: &Credentials,
    email_redirect_to: &str,
  ) -> Result<Option<AuthUser>, ProviderError> {
    self.record(ProviderCall::SignUp {
      email: credentials.email().to_string(),
      redirect_to: email_redirect_to.to_string(),
    });
    self.sign_up.clone()
  }

  async fn sign_out(&self, access_token: Option<&AccessToken>) -> Result<(), ProviderError> {
    self.record(ProviderCall::SignOut {
      with_token: access_token.is_some(),
    });
    self.sign_out.clone()
  }

  async fn get_user(&self, _access_token: &AccessToken) -> Result<Option<AuthUser>, ProviderError> {
    self.record(ProviderCall::GetUser);
    self.get_user.clone()
  }
}

/// Page cache that only records which paths were revalidated
#[derive(Default)]
pub struct RecordingPageCache {
  revalidated: Mutex<Vec<String>>,
  unavailable: bool,
}

impl RecordingPageCache {
  pub fn unavailable() -> Self {
    Self {
      revalidated: Mutex::new(Vec::new()),
      unavailable: true,
    }
  }

  pub fn revalidated(&self) -> Vec<String> {
    self.revalidated.lock().clone()
  }
}

#[async_trait]
impl PageCache for RecordingPageCache {
  async fn get(&self, _path: &str, _user_id: Uuid) -> Result<Option<String>, CacheError> {
    Ok(None)
  }

  async fn put(&self, _path: &str, _user_id: Uuid, _html: String) -> Result<(), CacheError> {
    Ok(())
  }

  async fn revalidate_path(&self, path: &str) -> Result<usize, CacheError> {
    if self.unavailable {
      return Err(CacheError::Unavailable("store offline".to_string()));
    }
    self.revalidated.lock().push(path.to_string());
    Ok(0)
  }
}
