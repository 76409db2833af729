use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header,
};
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc, sync::Arc};

use crate::adapters::http::session::{ACCESS_TOKEN_COOKIE, SessionCookies};
use crate::application::auth::{GetCurrentUserUseCase, LOGIN_PATH};

/// Guards page routes behind the provider session cookie
///
/// A valid session puts the `AuthUser` into request extensions. Anything
/// else is redirected to the login page; a stale cookie is cleared on the
/// way.
pub struct WebAuthMiddleware {
  get_user_use_case: Arc<GetCurrentUserUseCase>,
  cookies: SessionCookies,
}

impl WebAuthMiddleware {
  pub fn new(get_user_use_case: Arc<GetCurrentUserUseCase>, cookies: SessionCookies) -> Self {
    Self {
      get_user_use_case,
      cookies,
    }
  }
}

impl<S, B> Transform<S, ServiceRequest> for WebAuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type InitError = ();
  type Transform = WebAuthMiddlewareService<S>;
  type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(WebAuthMiddlewareService {
      service: Rc::new(service),
      get_user_use_case: self.get_user_use_case.clone(),
      cookies: self.cookies.clone(),
    }))
  }
}

pub struct WebAuthMiddlewareService<S> {
  service: Rc<S>,
  get_user_use_case: Arc<GetCurrentUserUseCase>,
  cookies: SessionCookies,
}

impl<S, B> Service<ServiceRequest> for WebAuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let token = SessionCookies::token_from(req.cookie(ACCESS_TOKEN_COOKIE));

    let get_user_use_case = self.get_user_use_case.clone();
    let cookies = self.cookies.clone();
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      if let Some(user) = get_user_use_case.execute(token.as_ref()).await {
        req.extensions_mut().insert(user);
        let res = service.call(req).await?;
        return Ok(res.map_into_left_body());
      }

      let mut response = HttpResponse::Found();
      response.insert_header((header::LOCATION, LOGIN_PATH));
      if token.is_some() {
        tracing::debug!("Session cookie rejected, clearing it");
        response.cookie(cookies.clear());
      }

      Ok(req.into_response(response.finish()).map_into_right_body())
    })
  }
}
