use actix_web::{
  HttpRequest,
  cookie::{Cookie, SameSite, time::Duration},
  http::header,
};

use crate::domain::auth::entities::AuthSession;
use crate::domain::auth::value_objects::AccessToken;
use crate::infrastructure::config::SessionConfig;

/// Cookie holding the provider access token
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// Builds and reads the session cookie
#[derive(Debug, Clone)]
pub struct SessionCookies {
  secure: bool,
}

impl SessionCookies {
  pub fn new(config: &SessionConfig) -> Self {
    Self {
      secure: config.secure_cookies,
    }
  }

  /// Access token from the session cookie
  pub fn access_token(req: &HttpRequest) -> Option<AccessToken> {
    Self::token_from(req.cookie(ACCESS_TOKEN_COOKIE))
  }

  /// Access token from an `Authorization: Bearer` header, falling back to
  /// the session cookie
  pub fn bearer_or_cookie(req: &HttpRequest) -> Option<AccessToken> {
    req
      .headers()
      .get(header::AUTHORIZATION)
      .and_then(|h| h.to_str().ok())
      .and_then(|s| s.strip_prefix("Bearer "))
      .and_then(AccessToken::new)
      .or_else(|| Self::access_token(req))
  }

  pub fn token_from(cookie: Option<Cookie<'_>>) -> Option<AccessToken> {
    cookie.and_then(|c| AccessToken::new(c.value()))
  }

  /// Cookie carrying a freshly issued session, expiring with the token
  pub fn establish(&self, session: &AuthSession) -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE, session.access_token.as_str().to_string())
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .secure(self.secure)
      .max_age(Duration::seconds(session.seconds_remaining()))
      .finish()
  }

  /// Cookie that removes the session from the browser
  pub fn clear(&self) -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE, "")
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .secure(self.secure)
      .max_age(Duration::seconds(0))
      .finish()
  }
}
