use actix_web::{HttpRequest, HttpResponse, http::header};

use crate::application::auth::{Redirect, SessionChange};

use super::session::SessionCookies;

/// True for requests issued by htmx
pub fn is_htmx(req: &HttpRequest) -> bool {
  req
    .headers()
    .get("HX-Request")
    .and_then(|h| h.to_str().ok())
    .is_some_and(|v| v == "true")
}

/// Performs a redirect requested by an auth action
///
/// htmx requests get `200` with `HX-Redirect` so the client does a full page
/// navigation; everything else gets `303 See Other`. The session cookie is
/// set or cleared on the same response.
pub fn navigate(redirect: Redirect, cookies: &SessionCookies, htmx: bool) -> HttpResponse {
  let (location, session) = redirect.into_parts();

  let mut response = if htmx {
    HttpResponse::Ok()
  } else {
    HttpResponse::SeeOther()
  };

  if htmx {
    response.insert_header(("HX-Redirect", location));
  } else {
    response.insert_header((header::LOCATION, location));
  }

  match session {
    SessionChange::Established(session) => {
      response.cookie(cookies.establish(&session));
    }
    SessionChange::Cleared => {
      response.cookie(cookies.clear());
    }
    SessionChange::Unchanged => {}
  }

  response.finish()
}

/// Plain `302 Found` used by the page guards
pub fn found(location: &str) -> HttpResponse {
  HttpResponse::Found()
    .insert_header((header::LOCATION, location))
    .finish()
}
