pub mod auth;
pub mod documents;
pub mod pages;
pub mod web_auth;

use actix_web::{HttpMessage, HttpRequest};

use crate::adapters::http::errors::ApiError;
use crate::domain::auth::entities::AuthUser;

/// Extract authenticated user from request extensions (set by WebAuthMiddleware)
pub fn current_user(req: &HttpRequest) -> Result<AuthUser, ApiError> {
  let user = req.extensions().get::<AuthUser>().cloned();

  if user.is_none() {
    tracing::warn!(
      "current_user: user not found in request extensions for path {}",
      req.path()
    );
  }

  user.ok_or(ApiError::Unauthenticated)
}
